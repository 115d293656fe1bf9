use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;

use rustc_hash::FxHashMap;
use slab::Slab;

pub type NodeKey = usize;

pub(crate) type Map<K, V> = FxHashMap<K, V>;

/// Listener attached to a node. Invoked by the renderer when the matching
/// event fires on that node.
pub type Callback = Rc<dyn Fn(EventData)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Fragment,
    Tag {
        name: &'static str,
        attrs: Vec<(&'static str, String)>,
    },
    Text(String),
}

impl Element {
    pub fn tag(name: &'static str) -> Self {
        Element::Tag {
            name,
            attrs: Vec::new(),
        }
    }

    pub fn text<T: Into<String>>(text: T) -> Self {
        Element::Text(text.into())
    }

    pub fn name(&self) -> Option<&'static str> {
        match self {
            Element::Tag { name, .. } => Some(*name),
            _ => None,
        }
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Element::Fragment => f.write_str("#fragment"),
            Element::Tag { name, attrs } => {
                f.write_str(name)?;
                if !attrs.is_empty() {
                    f.write_str("[")?;
                    for (i, (k, v)) in attrs.iter().enumerate() {
                        if i > 0 {
                            f.write_str(" ")?;
                        }
                        write!(f, "{}={:?}", k, v)?;
                    }
                    f.write_str("]")?;
                }
                Ok(())
            }
            Element::Text(text) => write!(f, "{:?}", text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Input,
    Click,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventData {
    Input(String),
    Click,
}

impl EventData {
    pub fn kind(&self) -> EventKind {
        match self {
            EventData::Input(_) => EventKind::Input,
            EventData::Click => EventKind::Click,
        }
    }

    /// Raw value carried by the event, empty for clicks.
    pub fn value(&self) -> String {
        match self {
            EventData::Input(value) => value.clone(),
            EventData::Click => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub parent: Option<NodeKey>,
    pub children: Vec<NodeKey>,
    pub element: Element,
}

impl Node {
    pub(crate) fn new(parent: Option<NodeKey>, element: Element) -> Self {
        Self {
            parent,
            children: Vec::new(),
            element,
        }
    }
}

/// Immutable tree description produced by a view. Renderers consume it as a
/// whole; nothing inside is patched after composition.
pub struct Tree {
    pub(crate) nodes: Slab<Node>,
    pub(crate) root: NodeKey,
    pub(crate) listeners: Map<(NodeKey, EventKind), Callback>,
}

impl Tree {
    #[inline(always)]
    pub fn root(&self) -> NodeKey {
        self.root
    }

    #[inline(always)]
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Number of nodes, including the root fragment.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing but the root fragment was composed.
    pub fn is_empty(&self) -> bool {
        self.nodes[self.root].children.is_empty()
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes
            .get(key)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// All nodes with the given tag, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<NodeKey> {
        let mut found = Vec::new();
        self.walk(self.root, &mut |key, node| {
            if node.element.name() == Some(tag) {
                found.push(key);
            }
        });
        found
    }

    pub fn find(&self, tag: &str) -> Option<NodeKey> {
        self.find_all(tag).into_iter().next()
    }

    pub fn attr(&self, key: NodeKey, attr: &str) -> Option<&str> {
        match &self.nodes.get(key)?.element {
            Element::Tag { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| *k == attr)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Concatenated text of the node and all of its descendants.
    pub fn text_content(&self, key: NodeKey) -> String {
        let mut out = String::new();
        self.walk(key, &mut |_, node| {
            if let Element::Text(text) = &node.element {
                out.push_str(text);
            }
        });
        out
    }

    pub fn has_listener(&self, key: NodeKey, kind: EventKind) -> bool {
        self.listeners.contains_key(&(key, kind))
    }

    /// Invokes the listener registered for `event` on `key`. Returns false
    /// when the node has no such listener.
    pub fn fire(&self, key: NodeKey, event: EventData) -> bool {
        match self.listeners.get(&(key, event.kind())).cloned() {
            Some(callback) => {
                callback(event);
                true
            }
            None => false,
        }
    }

    /// Structural equality, ignoring listener identity.
    pub fn same_structure(&self, other: &Tree) -> bool {
        self.node_eq(self.root, other, other.root)
    }

    fn node_eq(&self, key: NodeKey, other: &Tree, other_key: NodeKey) -> bool {
        let a = &self.nodes[key];
        let b = &other.nodes[other_key];
        a.element == b.element
            && a.children.len() == b.children.len()
            && [EventKind::Input, EventKind::Click]
                .iter()
                .all(|k| self.has_listener(key, *k) == other.has_listener(other_key, *k))
            && a.children
                .iter()
                .zip(b.children.iter())
                .all(|(x, y)| self.node_eq(*x, other, *y))
    }

    fn walk<F>(&self, key: NodeKey, visit: &mut F)
    where
        F: FnMut(NodeKey, &Node),
    {
        if let Some(node) = self.nodes.get(key) {
            visit(key, node);
            for child in &node.children {
                self.walk(*child, visit);
            }
        }
    }

    fn fmt_node(
        &self,
        f: &mut Formatter<'_>,
        key: NodeKey,
        has_sibling: bool,
        lines: &str,
    ) -> fmt::Result {
        let node = &self.nodes[key];
        let fork = if has_sibling { "├── " } else { "└── " };
        write!(f, "{}{}{}", lines, fork, node.element)?;
        for kind in [EventKind::Input, EventKind::Click] {
            if self.has_listener(key, kind) {
                write!(f, " @{:?}", kind)?;
            }
        }
        writeln!(f)?;
        let bar = if has_sibling { "│   " } else { "    " };
        let lines = format!("{}{}", lines, bar);
        let num_children = node.children.len();
        for (index, child) in node.children.iter().enumerate() {
            self.fmt_node(f, *child, index + 1 < num_children, &lines)?;
        }
        Ok(())
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.same_structure(other)
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Root")?;
        let children = &self.nodes[self.root].children;
        for (index, child) in children.iter().enumerate() {
            self.fmt_node(f, *child, index + 1 < children.len(), "")?;
        }
        Ok(())
    }
}

impl Debug for Tree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn sample() -> Tree {
        let mut nodes = Slab::new();
        let root = nodes.insert(Node::new(None, Element::Fragment));
        let div = nodes.insert(Node::new(Some(root), Element::tag("div")));
        nodes[root].children.push(div);
        let text = nodes.insert(Node::new(Some(div), Element::text("hello")));
        nodes[div].children.push(text);
        Tree {
            nodes,
            root,
            listeners: Map::default(),
        }
    }

    #[test]
    fn display_draws_branches() {
        let tree = sample();
        assert_eq!(tree.to_string(), "Root\n└── div\n    └── \"hello\"\n");
    }

    #[test]
    fn fire_without_listener_is_noop() {
        let tree = sample();
        let div = tree.find("div").unwrap();
        assert!(!tree.fire(div, EventData::Click));
    }

    #[test]
    fn fire_dispatches_by_kind() {
        let mut tree = sample();
        let div = tree.find("div").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        tree.listeners.insert(
            (div, EventKind::Input),
            Rc::new(move |e: EventData| sink.borrow_mut().push(e.value())),
        );
        assert!(!tree.fire(div, EventData::Click));
        assert!(tree.fire(div, EventData::Input("abc".into())));
        assert_eq!(*seen.borrow(), vec!["abc".to_string()]);
    }

    #[test]
    fn same_structure_notices_listeners() {
        let a = sample();
        let mut b = sample();
        assert_eq!(a, b);
        let div = b.find("div").unwrap();
        b.listeners.insert((div, EventKind::Click), Rc::new(|_: EventData| {}));
        assert_ne!(a, b);
    }
}
