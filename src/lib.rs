#![allow(clippy::new_without_default)]

mod composer;
pub use composer::{Composer, Root, Scope};

mod store;
pub use store::{Store, SubscriptionId};

mod emitter;
pub use emitter::Emitter;

mod runtime;
pub use runtime::{App, Runtime};

mod tree;
pub use tree::{Callback, Element, EventData, EventKind, Node, NodeKey, Tree};

pub mod html;
pub use html::Html;

pub mod render;
pub use render::{MemoryRenderer, MountTarget, Renderer, TextRenderer};

pub mod error;
pub use error::{ConfigError, FetchError, ViewError};

pub mod config;

pub mod friends;

pub mod songs;

pub use generational_box::{AnyStorage, Owner, UnsyncStorage};
