mod state;
pub use state::{
    commit_new_friend, update_text, FriendList, FriendsEvent, FriendsState, PendingInput,
    INITIAL_FRIENDS, INITIAL_OWNER,
};

mod view;
pub use view::{add_friend, friends_container, show_list, AddFriendProps};

use crate::composer::{Root, Scope};
use crate::emitter::Emitter;
use crate::runtime::App;

/// Friend list with a controlled text input.
#[derive(Debug, Clone)]
pub struct FriendsApp {
    owner_name: String,
    friends: Vec<String>,
}

impl FriendsApp {
    pub fn new<N, I, F>(owner_name: N, friends: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        Self {
            owner_name: owner_name.into(),
            friends: friends.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for FriendsApp {
    fn default() -> Self {
        Self::new(INITIAL_OWNER, INITIAL_FRIENDS)
    }
}

impl App for FriendsApp {
    type State = FriendsState;
    type Event = FriendsEvent;

    fn init(&self) -> FriendsState {
        FriendsState::new(&self.owner_name, self.friends.iter().cloned())
    }

    fn update(&self, state: &FriendsState, event: FriendsEvent) -> FriendsState {
        match event {
            FriendsEvent::UpdateText(text) => update_text(state, text),
            FriendsEvent::CommitNewFriend => commit_new_friend(state),
        }
    }

    fn view(&self, scope: Scope<Root>, state: &FriendsState, emitter: Emitter<FriendsEvent>) {
        friends_container(scope, state, emitter);
    }
}
