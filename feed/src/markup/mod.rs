//! Markup module
//!
//! A small element tree used both as the renderer's output and as the
//! in-memory document the enhancer decorates. Text and attribute values are
//! stored raw and escaped on serialization, so nothing built through this
//! tree can be interpreted as markup.

pub mod escape;

pub use escape::escape_html;

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source"];

/// A child of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// A single attribute; `value: None` serializes as a bare attribute name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

/// An HTML element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    // --- Builder API ---

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Valueless attribute such as `data-instgrm-captioned`
    pub fn flag(mut self, name: &str) -> Self {
        self.remove_attribute(name);
        self.attributes.push(Attribute {
            name: name.to_string(),
            value: None,
        });
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn maybe_child(self, child: Option<Element>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    // --- Attributes ---

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Attribute value; bare attributes read as `""`
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = Some(value.into());
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|a| a.name != name);
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attribute("class")
            .unwrap_or("")
            .split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.get_attribute("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_string(),
        };
        self.set_attribute("class", joined);
    }

    // --- Tree ---

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// First descendant (pre-order, excluding self) matching `predicate`
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        for child in self.child_elements() {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find(predicate) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.find(&|e: &Element| e.has_class(class))
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Element> {
        self.find(&|e: &Element| e.tag == tag)
    }

    /// Outermost descendants carrying `class`, in document order
    ///
    /// Matches are not searched for nested matches.
    pub fn select_class(&self, class: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_by_class(self, class, &mut out);
        out
    }

    /// Mutable counterpart of [`Element::select_class`]
    pub fn select_class_mut(&mut self, class: &str) -> Vec<&mut Element> {
        let mut out = Vec::new();
        collect_by_class_mut(self, class, &mut out);
        out
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        if self.get_attribute("id") == Some(id) {
            return Some(self);
        }
        self.child_elements()
            .find_map(|child| child.get_element_by_id(id))
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.get_attribute("id") == Some(id) {
            return Some(self);
        }
        for node in self.children.iter_mut() {
            if let Node::Element(child) = node {
                if let Some(found) = child.get_element_by_id_mut(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Concatenated text of all descendant text nodes (DOM `textContent`)
    pub fn text_content(&self) -> String {
        self.text_segments().concat()
    }

    /// Descendant text nodes in document order
    pub fn text_segments(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_text(self, &mut out);
        out
    }

    // --- Serialization ---

    pub fn to_html(&self) -> String {
        let mut buf = String::new();
        self.write_html(&mut buf);
        buf
    }

    pub fn write_html(&self, buf: &mut String) {
        buf.push('<');
        buf.push_str(&self.tag);
        for attribute in &self.attributes {
            buf.push(' ');
            buf.push_str(&attribute.name);
            if let Some(value) = &attribute.value {
                buf.push_str("=\"");
                buf.push_str(&escape_html(value));
                buf.push('"');
            }
        }
        buf.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            match child {
                Node::Element(element) => element.write_html(buf),
                Node::Text(text) => buf.push_str(&escape_html(text)),
            }
        }

        buf.push_str("</");
        buf.push_str(&self.tag);
        buf.push('>');
    }
}

fn collect_by_class<'a>(element: &'a Element, class: &str, out: &mut Vec<&'a Element>) {
    for child in element.child_elements() {
        if child.has_class(class) {
            out.push(child);
        } else {
            collect_by_class(child, class, out);
        }
    }
}

fn collect_by_class_mut<'a>(element: &'a mut Element, class: &str, out: &mut Vec<&'a mut Element>) {
    for node in element.children.iter_mut() {
        if let Node::Element(child) = node {
            if child.has_class(class) {
                out.push(child);
            } else {
                collect_by_class_mut(child, class, out);
            }
        }
    }
}

fn collect_text<'a>(element: &'a Element, out: &mut Vec<&'a str>) {
    for child in &element.children {
        match child {
            Node::Element(element) => collect_text(element, out),
            Node::Text(text) => out.push(text),
        }
    }
}
