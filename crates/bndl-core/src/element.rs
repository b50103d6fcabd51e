//! The model tree the resolver walks: requirements, bundles, and generic
//! compound elements such as projects.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::bundle::Bundle;
use crate::requirement::Requirement;

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a model element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// A named node with an ordered list of child elements.
///
/// Children can be added after construction, which allows a compound to
/// (directly or indirectly) contain itself.
pub struct Compound {
    id: ElementId,
    name: String,
    children: RwLock<Vec<Element>>,
}

impl Compound {
    pub fn new(name: &str) -> Arc<Self> {
        Self::with_children(name, Vec::new())
    }

    pub fn with_children(name: &str, children: Vec<Element>) -> Arc<Self> {
        Arc::new(Self {
            id: ElementId::next(),
            name: name.to_string(),
            children: RwLock::new(children),
        })
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_child(&self, child: impl Into<Element>) {
        let mut children = self.children.write().unwrap_or_else(|e| e.into_inner());
        children.push(child.into());
    }

    /// Snapshot of the children in declaration order.
    pub fn children(&self) -> Vec<Element> {
        self.children
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl fmt::Debug for Compound {
    // Children may refer back to this compound, so only their count is shown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self
            .children
            .read()
            .map(|c| c.len())
            .unwrap_or_else(|e| e.into_inner().len());
        f.debug_struct("Compound")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("children", &count)
            .finish()
    }
}

/// Any element of the model.
#[derive(Debug, Clone)]
pub enum Element {
    Requirement(Arc<Requirement>),
    Bundle(Arc<Bundle>),
    Compound(Arc<Compound>),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Requirement(r) => r.id(),
            Element::Bundle(b) => b.id(),
            Element::Compound(c) => c.id(),
        }
    }

    pub fn as_requirement(&self) -> Option<&Arc<Requirement>> {
        match self {
            Element::Requirement(r) => Some(r),
            _ => None,
        }
    }

    /// Children in declaration order, or `None` for leaf elements.
    ///
    /// A bundle's children are its requirements.
    pub fn children(&self) -> Option<Vec<Element>> {
        match self {
            Element::Requirement(_) => None,
            Element::Bundle(b) => Some(
                b.requirements()
                    .iter()
                    .cloned()
                    .map(Element::Requirement)
                    .collect(),
            ),
            Element::Compound(c) => Some(c.children()),
        }
    }

    pub fn is_compound(&self) -> bool {
        !matches!(self, Element::Requirement(_))
    }
}

impl From<Arc<Requirement>> for Element {
    fn from(value: Arc<Requirement>) -> Self {
        Element::Requirement(value)
    }
}

impl From<Requirement> for Element {
    fn from(value: Requirement) -> Self {
        Element::Requirement(Arc::new(value))
    }
}

impl From<Arc<Bundle>> for Element {
    fn from(value: Arc<Bundle>) -> Self {
        Element::Bundle(value)
    }
}

impl From<Arc<Compound>> for Element {
    fn from(value: Arc<Compound>) -> Self {
        Element::Compound(value)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Requirement(r) => write!(f, "{r}"),
            Element::Bundle(b) => write!(f, "{b}"),
            Element::Compound(c) => f.write_str(&c.name),
        }
    }
}
