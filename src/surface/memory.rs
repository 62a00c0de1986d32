// SPDX-License-Identifier: MPL-2.0
//! In-memory [`Surface`] implementation.
//!
//! Keeps a small element tree rooted at a `body` element, inline styles,
//! classes and attributes per element, a listener table, and the page scroll
//! offset. The host drives it by calling [`MemorySurface::dispatch`] (or the
//! `click` / `key_down` / `fire_load` / `fire_error` shorthands).
//!
//! Supported selectors: comma-separated lists of descendant chains made of
//! compounds such as `img`, `.thumb`, `#hero`, `a.photo.large`, `*`.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use super::{
    ElementId, Event, EventContext, EventKind, EventTarget, Handler, ListenerId, StyleProperty,
    Surface,
};

#[derive(Debug, Default)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<StyleProperty, String>,
    inner_html: String,
}

struct Listener {
    id: ListenerId,
    target: EventTarget,
    kind: EventKind,
    handler: Handler,
}

struct Document {
    nodes: HashMap<ElementId, Node>,
    body: ElementId,
    next_element: u64,
    listeners: Vec<Listener>,
    next_listener: u64,
    scroll_y: f64,
    layout_reads: u64,
}

impl Document {
    fn new() -> Self {
        let body = ElementId::from_raw(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            body,
            Node {
                tag: "body".to_string(),
                ..Node::default()
            },
        );
        Self {
            nodes,
            body,
            next_element: 1,
            listeners: Vec::new(),
            next_listener: 0,
            scroll_y: 0.0,
            layout_reads: 0,
        }
    }

    fn detach(&mut self, element: ElementId) {
        let parent = self.nodes.get_mut(&element).and_then(|n| n.parent.take());
        if let Some(parent) = parent {
            if let Some(node) = self.nodes.get_mut(&parent) {
                node.children.retain(|c| *c != element);
            }
        }
    }

    /// Detaches `element` and drops it with its whole subtree, along with
    /// every listener targeting a dropped node. `body` is never dropped.
    fn free(&mut self, element: ElementId) {
        if element == self.body {
            return;
        }
        self.detach(element);
        let mut doomed = Vec::new();
        self.collect_in_order(element, &mut doomed);
        for id in &doomed {
            self.nodes.remove(id);
        }
        self.listeners.retain(|l| match l.target {
            EventTarget::Element(el) => !doomed.contains(&el),
            EventTarget::Document => true,
        });
    }

    fn is_ancestor_or_self(&self, candidate: ElementId, mut element: ElementId) -> bool {
        loop {
            if element == candidate {
                return true;
            }
            match self.nodes.get(&element).and_then(|n| n.parent) {
                Some(parent) => element = parent,
                None => return false,
            }
        }
    }

    fn collect_in_order(&self, root: ElementId, out: &mut Vec<ElementId>) {
        out.push(root);
        if let Some(node) = self.nodes.get(&root) {
            for child in &node.children {
                self.collect_in_order(*child, out);
            }
        }
    }

    fn propagation_path(&self, event: &Event) -> Vec<EventTarget> {
        let Some(target) = event.target else {
            return vec![EventTarget::Document];
        };
        if !self.nodes.contains_key(&target) {
            return Vec::new();
        }
        let mut path = vec![EventTarget::Element(target)];
        if !event.kind.bubbles() {
            return path;
        }
        let mut current = self.nodes.get(&target).and_then(|n| n.parent);
        while let Some(parent) = current {
            path.push(EventTarget::Element(parent));
            current = self.nodes.get(&parent).and_then(|n| n.parent);
        }
        if self.is_ancestor_or_self(self.body, target) {
            path.push(EventTarget::Document);
        }
        path
    }
}

/// Document-like element tree living entirely in memory.
pub struct MemorySurface {
    doc: RefCell<Document>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemorySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.doc.borrow();
        f.debug_struct("MemorySurface")
            .field("elements", &doc.nodes.len())
            .field("listeners", &doc.listeners.len())
            .field("scroll_y", &doc.scroll_y)
            .finish()
    }
}

impl MemorySurface {
    /// Creates an empty page holding only `body`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            doc: RefCell::new(Document::new()),
        }
    }

    /// Creates an element with attributes and appends it to `parent`.
    ///
    /// A `class` attribute is split into the element's class list.
    pub fn add_element(&self, parent: ElementId, tag: &str, attributes: &[(&str, &str)]) -> ElementId {
        let element = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attribute(element, name, value);
        }
        self.append_child(parent, element);
        element
    }

    /// Delivers `event` along its propagation path and returns how many
    /// listeners ran.
    ///
    /// Listeners are snapshotted per node; one removed by an earlier listener
    /// of the same dispatch is skipped.
    pub fn dispatch(&self, event: &Event) -> usize {
        let path = self.doc.borrow().propagation_path(event);
        let Some(first) = path.first().copied() else {
            return 0;
        };

        let mut ctx = EventContext::new(event, first);
        let mut invoked = 0;
        for node in path {
            ctx.retarget(node);
            let handlers: Vec<(ListenerId, Handler)> = self
                .doc
                .borrow()
                .listeners
                .iter()
                .filter(|l| l.target == node && l.kind == event.kind)
                .map(|l| (l.id, Rc::clone(&l.handler)))
                .collect();
            for (id, handler) in handlers {
                let still_attached = self.doc.borrow().listeners.iter().any(|l| l.id == id);
                if !still_attached {
                    continue;
                }
                handler(&mut ctx);
                invoked += 1;
            }
            if ctx.is_propagation_stopped() {
                break;
            }
        }
        invoked
    }

    pub fn click(&self, element: ElementId) -> usize {
        self.dispatch(&Event::click(element))
    }

    pub fn key_down(&self, key: &str) -> usize {
        self.dispatch(&Event::key_down(key))
    }

    pub fn fire_load(&self, element: ElementId) -> usize {
        self.dispatch(&Event::load(element))
    }

    pub fn fire_error(&self, element: ElementId) -> usize {
        self.dispatch(&Event::error(element))
    }

    /// Simulates the user scrolling the page.
    pub fn set_scroll_y(&self, y: f64) {
        self.doc.borrow_mut().scroll_y = y;
    }

    #[must_use]
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.doc.borrow().nodes.get(&element).and_then(|n| n.parent)
    }

    #[must_use]
    pub fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.doc
            .borrow()
            .nodes
            .get(&element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Whether `element` is connected to `body`.
    #[must_use]
    pub fn is_attached(&self, element: ElementId) -> bool {
        let doc = self.doc.borrow();
        doc.is_ancestor_or_self(doc.body, element)
    }

    #[must_use]
    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.doc
            .borrow()
            .nodes
            .get(&element)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    #[must_use]
    pub fn inner_html(&self, element: ElementId) -> String {
        self.doc
            .borrow()
            .nodes
            .get(&element)
            .map(|n| n.inner_html.clone())
            .unwrap_or_default()
    }

    /// First attached element carrying `class`.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Option<ElementId> {
        self.query_selector_all(&format!(".{class}")).first().copied()
    }

    /// Elements currently alive, attached or not, `body` included.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.doc.borrow().nodes.len()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.doc.borrow().listeners.len()
    }

    /// Listeners attached to `target` for `kind`.
    #[must_use]
    pub fn listeners_on(&self, target: EventTarget, kind: EventKind) -> usize {
        self.doc
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .count()
    }

    /// Number of forced layout reads so far.
    #[must_use]
    pub fn layout_reads(&self) -> u64 {
        self.doc.borrow().layout_reads
    }
}

impl Surface for MemorySurface {
    fn body(&self) -> ElementId {
        self.doc.borrow().body
    }

    fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        let selectors = parse_selector_list(selector);
        if selectors.is_empty() {
            return Vec::new();
        }
        let doc = self.doc.borrow();
        let mut ordered = Vec::new();
        doc.collect_in_order(doc.body, &mut ordered);
        ordered
            .into_iter()
            .filter(|el| selectors.iter().any(|s| s.matches(&doc, *el)))
            .collect()
    }

    fn tag_name(&self, element: ElementId) -> Option<String> {
        self.doc.borrow().nodes.get(&element).map(|n| n.tag.clone())
    }

    fn create_element(&self, tag: &str) -> ElementId {
        let mut doc = self.doc.borrow_mut();
        let id = ElementId::from_raw(doc.next_element);
        doc.next_element += 1;
        doc.nodes.insert(
            id,
            Node {
                tag: tag.to_ascii_lowercase(),
                ..Node::default()
            },
        );
        id
    }

    fn append_child(&self, parent: ElementId, child: ElementId) {
        let mut doc = self.doc.borrow_mut();
        if !doc.nodes.contains_key(&parent) || !doc.nodes.contains_key(&child) {
            return;
        }
        if doc.is_ancestor_or_self(child, parent) {
            return;
        }
        doc.detach(child);
        if let Some(node) = doc.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = doc.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn remove_element(&self, element: ElementId) {
        self.doc.borrow_mut().free(element);
    }

    fn clear_children(&self, element: ElementId) {
        let mut doc = self.doc.borrow_mut();
        let children = doc
            .nodes
            .get(&element)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            doc.free(child);
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        let doc = self.doc.borrow();
        let node = doc.nodes.get(&element)?;
        if name == "class" {
            return (!node.classes.is_empty()).then(|| node.classes.join(" "));
        }
        node.attributes.get(name).cloned()
    }

    fn set_attribute(&self, element: ElementId, name: &str, value: &str) {
        let mut doc = self.doc.borrow_mut();
        let Some(node) = doc.nodes.get_mut(&element) else {
            return;
        };
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&self, element: ElementId, name: &str) {
        let mut doc = self.doc.borrow_mut();
        if let Some(node) = doc.nodes.get_mut(&element) {
            if name == "class" {
                node.classes.clear();
            } else {
                node.attributes.remove(name);
            }
        }
    }

    fn add_class(&self, element: ElementId, class: &str) {
        let mut doc = self.doc.borrow_mut();
        if let Some(node) = doc.nodes.get_mut(&element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&self, element: ElementId, class: &str) {
        let mut doc = self.doc.borrow_mut();
        if let Some(node) = doc.nodes.get_mut(&element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn set_inner_html(&self, element: ElementId, html: &str) {
        let mut doc = self.doc.borrow_mut();
        if let Some(node) = doc.nodes.get_mut(&element) {
            node.inner_html = html.to_string();
        }
    }

    fn set_style(&self, element: ElementId, property: StyleProperty, value: &str) {
        let mut doc = self.doc.borrow_mut();
        if let Some(node) = doc.nodes.get_mut(&element) {
            if value.is_empty() {
                node.styles.remove(&property);
            } else {
                node.styles.insert(property, value.to_string());
            }
        }
    }

    fn style(&self, element: ElementId, property: StyleProperty) -> Option<String> {
        self.doc
            .borrow()
            .nodes
            .get(&element)
            .and_then(|n| n.styles.get(&property).cloned())
    }

    fn force_layout(&self, element: ElementId) {
        let mut doc = self.doc.borrow_mut();
        if doc.nodes.contains_key(&element) {
            doc.layout_reads += 1;
        }
    }

    fn add_listener(&self, target: EventTarget, kind: EventKind, handler: Handler) -> ListenerId {
        let mut doc = self.doc.borrow_mut();
        let id = ListenerId::from_raw(doc.next_listener);
        doc.next_listener += 1;
        doc.listeners.push(Listener {
            id,
            target,
            kind,
            handler,
        });
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.doc.borrow_mut().listeners.retain(|l| l.id != id);
    }

    fn scroll_y(&self) -> f64 {
        self.doc.borrow().scroll_y
    }

    fn scroll_to(&self, y: f64) {
        self.doc.borrow_mut().scroll_y = y.max(0.0);
    }
}

// =============================================================================
// Selectors
// =============================================================================

#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(text: &str) -> Option<Self> {
        let mut compound = Compound::default();
        let mut rest = text;

        let tag_len = rest
            .find(|c: char| c == '.' || c == '#')
            .unwrap_or(rest.len());
        let tag = &rest[..tag_len];
        if !tag.is_empty() && tag != "*" {
            if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return None;
            }
            compound.tag = Some(tag.to_ascii_lowercase());
        }
        rest = &rest[tag_len..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let len = body
                .find(|c: char| c == '.' || c == '#')
                .unwrap_or(body.len());
            let name = &body[..len];
            if name.is_empty() {
                return None;
            }
            match marker {
                '#' => compound.id = Some(name.to_string()),
                _ => compound.classes.push(name.to_string()),
            }
            rest = &body[len..];
        }
        Some(compound)
    }

    fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag {
            if &node.tag != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.attributes.get("id") != Some(id) {
                return false;
            }
        }
        self.classes
            .iter()
            .all(|class| node.classes.iter().any(|c| c == class))
    }
}

/// Descendant chain, outermost compound first.
#[derive(Debug, PartialEq)]
struct Selector(Vec<Compound>);

impl Selector {
    fn matches(&self, doc: &Document, element: ElementId) -> bool {
        let Some((last, ancestors)) = self.0.split_last() else {
            return false;
        };
        let Some(node) = doc.nodes.get(&element) else {
            return false;
        };
        if !last.matches(node) {
            return false;
        }
        let mut pending = ancestors.iter().rev().peekable();
        let mut current = node.parent;
        while let (Some(compound), Some(ancestor)) = (pending.peek(), current) {
            let Some(ancestor_node) = doc.nodes.get(&ancestor) else {
                break;
            };
            if compound.matches(ancestor_node) {
                pending.next();
            }
            current = ancestor_node.parent;
        }
        pending.peek().is_none()
    }
}

fn parse_selector_list(selector: &str) -> Vec<Selector> {
    selector
        .split(',')
        .filter_map(|part| {
            let compounds: Option<Vec<Compound>> =
                part.split_whitespace().map(Compound::parse).collect();
            compounds.filter(|c| !c.is_empty()).map(Selector)
        })
        .collect()
}
