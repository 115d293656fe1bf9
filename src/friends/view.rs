use tracing::warn;

use crate::composer::Scope;
use crate::emitter::Emitter;
use crate::error::ViewError;
use crate::friends::{FriendsEvent, FriendsState};
use crate::html::Html;
use crate::tree::Callback;

/// Props of [`add_friend`]. `current_text` and `on_commit` are required;
/// leaving one out is reported by [`AddFriendProps::validate`].
#[derive(Clone, Default)]
pub struct AddFriendProps {
    pub current_text: Option<String>,
    pub on_commit: Option<Callback>,
    pub on_change: Option<Callback>,
}

impl AddFriendProps {
    pub fn validate(&self) -> Result<(), ViewError> {
        if self.on_commit.is_none() {
            return Err(ViewError::MissingProp {
                component: "AddFriend",
                prop: "on_commit",
            });
        }
        if self.current_text.is_none() {
            return Err(ViewError::MissingProp {
                component: "AddFriend",
                prop: "current_text",
            });
        }
        Ok(())
    }
}

pub fn friends_container<S>(s: Scope<S>, state: &FriendsState, emitter: Emitter<FriendsEvent>)
where
    S: 'static,
{
    s.div(|s| {
        s.h3(|s| s.text(format!(" Name: {} ", state.list.owner_name)));
        add_friend(
            s,
            AddFriendProps {
                current_text: Some(state.pending.current_text.clone()),
                on_commit: Some(emitter.callback(|_| FriendsEvent::CommitNewFriend)),
                on_change: Some(emitter.callback(|data| FriendsEvent::UpdateText(data.value()))),
            },
        );
        show_list(s, &state.list.friends);
    });
}

pub fn add_friend<S>(s: Scope<S>, props: AddFriendProps)
where
    S: 'static,
{
    if let Err(err) = props.validate() {
        warn!(%err, "composing with incomplete props");
    }
    let AddFriendProps {
        current_text,
        on_commit,
        on_change,
    } = props;
    s.div(move |s| {
        s.input(current_text.unwrap_or_default(), on_change);
        s.button(" Add Friend ", on_commit);
    });
}

/// One `li` per name. An empty list renders an empty `ul`.
pub fn show_list<S>(s: Scope<S>, names: &[String])
where
    S: 'static,
{
    s.div(|s| {
        s.h3(|s| s.text(" Friends "));
        s.ul(|s| {
            for name in names {
                s.li(|s| s.text(format!(" {} ", name)));
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::composer::Composer;
    use crate::tree::{EventData, EventKind};

    #[test]
    fn validate_reports_missing_commit_first() {
        let props = AddFriendProps::default();
        assert_eq!(
            props.validate(),
            Err(ViewError::MissingProp {
                component: "AddFriend",
                prop: "on_commit",
            })
        );
        let props = AddFriendProps {
            on_commit: Some(Rc::new(|_: EventData| {})),
            ..Default::default()
        };
        assert_eq!(
            props.validate(),
            Err(ViewError::MissingProp {
                component: "AddFriend",
                prop: "current_text",
            })
        );
    }

    #[test]
    fn incomplete_props_still_render() {
        let tree = Composer::compose(|s| add_friend(s, AddFriendProps::default()));
        let input = tree.find("input").unwrap();
        let button = tree.find("button").unwrap();
        assert_eq!(tree.attr(input, "value"), Some(""));
        assert!(!tree.has_listener(button, EventKind::Click));
        assert_eq!(tree.text_content(button), " Add Friend ");
    }

    #[test]
    fn empty_list_has_no_fallback() {
        let tree = Composer::compose(|s| show_list(s, &[]));
        let ul = tree.find("ul").unwrap();
        assert!(tree.children(ul).is_empty());
        assert!(tree.find("li").is_none());
    }
}
