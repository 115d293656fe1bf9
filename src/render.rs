use std::cell::RefCell;
use std::fmt::{self, Display, Formatter};
use std::io::Write;
use std::rc::Rc;

use tracing::warn;

use crate::tree::Tree;

pub const DEFAULT_MOUNT: &str = "app";

/// Fixed element id in the hosting page that a tree is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MountTarget(String);

impl MountTarget {
    pub fn new<T: Into<String>>(id: T) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl Default for MountTarget {
    fn default() -> Self {
        Self::new(DEFAULT_MOUNT)
    }
}

impl Display for MountTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// External renderer. Each call replaces whatever was previously mounted at
/// `mount`.
pub trait Renderer {
    fn render(&mut self, mount: &MountTarget, tree: Tree);
}

/// Writes every frame as an indented tree.
pub struct TextRenderer<W> {
    out: W,
}

impl<W> TextRenderer<W>
where
    W: Write,
{
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W> Renderer for TextRenderer<W>
where
    W: Write,
{
    fn render(&mut self, mount: &MountTarget, tree: Tree) {
        if let Err(err) = write!(self.out, "{}\n{}", mount, tree).and_then(|_| self.out.flush()) {
            warn!(error = %err, %mount, "failed to write frame");
        }
    }
}

#[derive(Debug)]
pub struct Frame {
    pub mount: MountTarget,
    pub tree: Rc<Tree>,
}

/// Keeps every frame in memory. Clones share the same frame list, so a
/// handle kept outside the runtime can inspect what was rendered.
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.borrow().len()
    }

    /// The most recent tree, the one currently mounted.
    pub fn current(&self) -> Option<Rc<Tree>> {
        self.frames.borrow().last().map(|frame| frame.tree.clone())
    }

    pub fn with_frames<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&[Frame]) -> T,
    {
        f(&self.frames.borrow())
    }
}

impl Renderer for MemoryRenderer {
    fn render(&mut self, mount: &MountTarget, tree: Tree) {
        self.frames.borrow_mut().push(Frame {
            mount: mount.clone(),
            tree: Rc::new(tree),
        });
    }
}
