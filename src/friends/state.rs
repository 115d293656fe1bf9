use std::iter;
use std::rc::Rc;

pub const INITIAL_OWNER: &str = "Cody";
pub const INITIAL_FRIENDS: [&str; 4] = ["Me", "Myself", "I", "The gangs all here"];

/// Owner name and friends, in insertion order. `friends` is shared and
/// never written through; a commit builds a new slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendList {
    pub owner_name: Rc<str>,
    pub friends: Rc<[String]>,
}

/// Scratch buffer mirroring the text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingInput {
    pub current_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendsState {
    pub list: FriendList,
    pub pending: PendingInput,
}

impl FriendsState {
    pub fn new<I, F>(owner_name: &str, friends: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        Self {
            list: FriendList {
                owner_name: Rc::from(owner_name),
                friends: friends.into_iter().map(Into::into).collect(),
            },
            pending: PendingInput::default(),
        }
    }
}

impl Default for FriendsState {
    fn default() -> Self {
        Self::new(INITIAL_OWNER, INITIAL_FRIENDS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FriendsEvent {
    UpdateText(String),
    CommitNewFriend,
}

pub fn update_text(state: &FriendsState, new_text: String) -> FriendsState {
    FriendsState {
        list: state.list.clone(),
        pending: PendingInput {
            current_text: new_text,
        },
    }
}

/// Appends the pending text as-is, empty or duplicate included, and clears
/// the input.
pub fn commit_new_friend(state: &FriendsState) -> FriendsState {
    let friends = state
        .list
        .friends
        .iter()
        .cloned()
        .chain(iter::once(state.pending.current_text.clone()))
        .collect::<Rc<[String]>>();
    FriendsState {
        list: FriendList {
            owner_name: state.list.owner_name.clone(),
            friends,
        },
        pending: PendingInput::default(),
    }
}
