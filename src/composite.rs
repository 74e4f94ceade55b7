//! Composite: load nodes and load clusters driven through one interface.
//!
//! Leaves only implement [`Loader`]. Child management lives on
//! [`LoadCluster`] alone; callers holding a `dyn Loader` ask for it through
//! [`Loader::as_cluster`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub trait Loader {
    fn name(&self) -> &str;
    fn start_load(&self) -> String;
    fn stop_load(&self) -> String;

    /// The cluster this loader was last added to, if it is still alive.
    fn parent(&self) -> Option<Rc<LoadCluster>>;

    /// Maintained by [`LoadCluster::add_node`] and [`LoadCluster::remove_node`].
    fn set_parent(&self, parent: Weak<LoadCluster>);

    fn as_cluster(&self) -> Option<&LoadCluster> {
        None
    }

    fn is_composite(&self) -> bool {
        self.as_cluster().is_some()
    }
}

pub struct LoadNode {
    name: String,
    parent: RefCell<Weak<LoadCluster>>,
}

impl LoadNode {
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        Rc::new(LoadNode {
            name: name.into(),
            parent: RefCell::new(Weak::new()),
        })
    }
}

impl Loader for LoadNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn start_load(&self) -> String {
        format!("{} started load.\n", self.name)
    }

    fn stop_load(&self) -> String {
        format!("{} stopped load.\n", self.name)
    }

    fn parent(&self) -> Option<Rc<LoadCluster>> {
        self.parent.borrow().upgrade()
    }

    fn set_parent(&self, parent: Weak<LoadCluster>) {
        *self.parent.borrow_mut() = parent;
    }
}

pub struct LoadCluster {
    name: String,
    me: Weak<LoadCluster>,
    parent: RefCell<Weak<LoadCluster>>,
    children: RefCell<Vec<Rc<dyn Loader>>>,
}

impl LoadCluster {
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        let name = name.into();
        Rc::new_cyclic(|me| LoadCluster {
            name,
            me: me.clone(),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        })
    }

    pub fn add_node(&self, component: Rc<dyn Loader>) {
        component.set_parent(self.me.clone());
        self.children.borrow_mut().push(component);
    }

    /// Detaches `component`. Returns `false` if it was not a direct child.
    pub fn remove_node(&self, component: &Rc<dyn Loader>) -> bool {
        let mut children = self.children.borrow_mut();
        match children.iter().position(|c| Rc::ptr_eq(c, component)) {
            Some(index) => {
                let removed = children.remove(index);
                removed.set_parent(Weak::new());
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.borrow().is_empty()
    }

    fn collect(&self, f: impl Fn(&dyn Loader) -> String) -> String {
        self.children.borrow().iter().map(|c| f(c.as_ref())).collect()
    }
}

impl Loader for LoadCluster {
    fn name(&self) -> &str {
        &self.name
    }

    fn start_load(&self) -> String {
        format!(
            "Cluster {} started load:\n{}",
            self.name,
            self.collect(|c| c.start_load())
        )
    }

    fn stop_load(&self) -> String {
        format!(
            "Cluster {} stopped load:\n{}",
            self.name,
            self.collect(|c| c.stop_load())
        )
    }

    fn parent(&self) -> Option<Rc<LoadCluster>> {
        self.parent.borrow().upgrade()
    }

    fn set_parent(&self, parent: Weak<LoadCluster>) {
        *self.parent.borrow_mut() = parent;
    }

    fn as_cluster(&self) -> Option<&LoadCluster> {
        Some(self)
    }
}

/// Output of `client_code`: start and stop, each followed by a blank line.
pub fn client_code(loader: &dyn Loader) -> String {
    format!("{}\n{}\n", loader.start_load(), loader.stop_load())
}

/// Adds `loader2` under `loader1` when `loader1` can hold children.
pub fn client_code2(loader1: &dyn Loader, loader2: Rc<dyn Loader>) -> String {
    if let Some(cluster) = loader1.as_cluster() {
        cluster.add_node(loader2);
    }
    client_code(loader1)
}
