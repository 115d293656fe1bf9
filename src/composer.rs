use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem;

use generational_box::{AnyStorage, GenerationalBox, UnsyncStorage};
use slab::Slab;

use crate::tree::{Callback, Element, EventKind, Map, Node, NodeKey, Tree};

/// Accumulates the nodes written by a view while it runs.
pub struct Composer {
    pub(crate) nodes: Slab<Node>,
    pub(crate) listeners: Map<(NodeKey, EventKind), Callback>,
}

impl Composer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            listeners: Map::default(),
        }
    }

    /// Runs `content` against a fresh root scope and returns the finished
    /// tree description.
    pub fn compose<F>(content: F) -> Tree
    where
        F: FnOnce(Scope<Root>),
    {
        let owner = UnsyncStorage::owner();
        let mut composer = Composer::with_capacity(64);
        let root = composer.nodes.insert(Node::new(None, Element::Fragment));
        let composer = owner.insert(composer);
        content(Scope::new(root, composer));
        let mut c = composer.write();
        Tree {
            nodes: mem::take(&mut c.nodes),
            root,
            listeners: mem::take(&mut c.listeners),
        }
    }
}

impl Debug for Composer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("nodes", &self.nodes)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

pub struct Scope<S> {
    pub key: NodeKey,
    composer: GenerationalBox<Composer>,
    ty: PhantomData<S>,
}

impl<S> Clone for Scope<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Scope<S> {}

impl<S> Scope<S>
where
    S: 'static,
{
    #[inline(always)]
    pub(crate) fn new(key: NodeKey, composer: GenerationalBox<Composer>) -> Self {
        Self {
            key,
            composer,
            ty: PhantomData,
        }
    }

    /// Appends a child node under this scope and composes its content.
    pub fn create_node<T, C>(&self, element: Element, content: C) -> NodeKey
    where
        T: 'static,
        C: FnOnce(Scope<T>),
    {
        let key = {
            let mut c = self.composer.write();
            let key = c.nodes.insert(Node::new(Some(self.key), element));
            c.nodes[self.key].children.push(key);
            key
        };
        content(Scope::new(key, self.composer));
        key
    }

    pub fn set_attr<V>(&self, name: &'static str, value: V)
    where
        V: Into<String>,
    {
        let mut c = self.composer.write();
        if let Element::Tag { attrs, .. } = &mut c.nodes[self.key].element {
            let value = value.into();
            match attrs.iter_mut().find(|(k, _)| *k == name) {
                Some(slot) => slot.1 = value,
                None => attrs.push((name, value)),
            }
        }
    }

    /// Registers `callback` for `kind` on this scope's node, replacing any
    /// earlier listener of the same kind.
    pub fn on(&self, kind: EventKind, callback: Callback) {
        let mut c = self.composer.write();
        c.listeners.insert((self.key, kind), callback);
    }
}

impl<S> Debug for Scope<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("key", &self.key)
            .field("ty", &self.ty)
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Root;
