use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

use generational_box::{AnyStorage, Owner, UnsyncStorage};
use tracing::debug;

use crate::composer::{Composer, Root, Scope};
use crate::emitter::Emitter;
use crate::render::{MountTarget, Renderer};
use crate::store::{Store, SubscriptionId};
use crate::tree::Tree;

/// One example application: its initial snapshot, its mutator and its view.
pub trait App: 'static {
    type State: Clone + 'static;
    type Event: Debug + 'static;

    fn init(&self) -> Self::State;

    /// Computes the next snapshot. Must not touch anything but its inputs.
    fn update(&self, state: &Self::State, event: Self::Event) -> Self::State;

    fn view(&self, scope: Scope<Root>, state: &Self::State, emitter: Emitter<Self::Event>);

    fn compose(&self, state: &Self::State, emitter: Emitter<Self::Event>) -> Tree {
        Composer::compose(|s| self.view(s, state, emitter))
    }
}

/// Wires an [`App`] to a store, an emitter and a renderer. Every snapshot
/// set on the store is turned into a tree and handed to the renderer.
pub struct Runtime<A>
where
    A: App,
{
    #[allow(dead_code)]
    owner: Owner,
    app: Rc<A>,
    store: Store<A::State>,
    emitter: Emitter<A::Event>,
    subscription: Option<SubscriptionId>,
    mount: MountTarget,
}

impl<A> Runtime<A>
where
    A: App,
{
    /// Creates the runtime and draws the initial view.
    pub fn mount<R>(app: A, mount: MountTarget, renderer: R) -> Self
    where
        R: Renderer + 'static,
    {
        let owner = UnsyncStorage::owner();
        let app = Rc::new(app);
        let store = Store::new_in(&owner, app.init());
        let emitter = {
            let app = app.clone();
            Emitter::new_in(&owner, move |event: A::Event| {
                debug!(?event, "dispatch");
                store.update(|state| app.update(state, event));
            })
        };
        let subscription = {
            let app = app.clone();
            let mount = mount.clone();
            let mut renderer = renderer;
            store.subscribe(move |state: &A::State| {
                let tree = app.compose(state, emitter);
                debug!(%mount, nodes = tree.len(), "render");
                renderer.render(&mount, tree);
            })
        };
        let runtime = Self {
            owner,
            app,
            store,
            emitter,
            subscription,
            mount,
        };
        runtime.render_now();
        runtime
    }

    /// Hands a freshly composed tree of the current snapshot to the renderer.
    pub fn render_now(&self) {
        self.store.notify();
    }

    pub fn dispatch(&self, event: A::Event) {
        self.emitter.emit(event);
    }

    pub fn emitter(&self) -> Emitter<A::Event> {
        self.emitter
    }

    pub fn store(&self) -> Store<A::State> {
        self.store
    }

    pub fn snapshot(&self) -> A::State {
        self.store.get()
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn mount_target(&self) -> &MountTarget {
        &self.mount
    }

    /// Stops rendering. Events are still applied to the store.
    pub fn detach_renderer(&self) -> bool {
        self.subscription
            .map_or(false, |id| self.store.unsubscribe(id))
    }
}

impl<A> Debug for Runtime<A>
where
    A: App,
    A::State: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("mount", &self.mount)
            .field("store", &self.store)
            .finish()
    }
}
