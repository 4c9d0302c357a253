//! Declarative view tree.
//!
//! The controller renders its whole state into a [`ViewNode`] tree on every
//! change. A host document turns the tree into real elements; handlers carry
//! the [`Event`] to feed back when the element is activated.

use std::fmt::Write;

use crate::event::Event;

/// Element interactions a handler can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Click,
    PointerEnter,
    PointerLeave,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Handler {
    pub trigger: Trigger,
    pub event: Event,
}

/// One element in the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNode {
    pub tag: &'static str,
    pub classes: Vec<&'static str>,
    pub style: Vec<(&'static str, String)>,
    pub attrs: Vec<(&'static str, String)>,
    pub text: Option<String>,
    pub handlers: Vec<Handler>,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            style: Vec::new(),
            attrs: Vec::new(),
            text: None,
            handlers: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn div(class: &'static str) -> Self {
        Self::new("div").class(class)
    }

    pub fn span(class: &'static str) -> Self {
        Self::new("span").class(class)
    }

    pub fn button(class: &'static str) -> Self {
        Self::new("button").class(class)
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn class_if(self, condition: bool, class: &'static str) -> Self {
        if condition { self.class(class) } else { self }
    }

    pub fn style(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.style.push((property, value.into()));
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn on(mut self, trigger: Trigger, event: Event) -> Self {
        self.handlers.push(Handler { trigger, event });
        self
    }

    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Event bound to `trigger`, if any.
    pub fn handler(&self, trigger: Trigger) -> Option<&Event> {
        self.handlers
            .iter()
            .find(|h| h.trigger == trigger)
            .map(|h| &h.event)
    }

    /// Depth-first search for the first node carrying `class`.
    pub fn find(&self, class: &str) -> Option<&ViewNode> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(class))
    }

    /// All nodes carrying `class`, in document order.
    pub fn find_all<'a>(&'a self, class: &str) -> Vec<&'a ViewNode> {
        let mut found = Vec::new();
        self.collect(class, &mut found);
        found
    }

    fn collect<'a>(&'a self, class: &str, found: &mut Vec<&'a ViewNode>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in &self.children {
            child.collect(class, found);
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Serialize to HTML. Handlers are emitted as `data-on-*` markers.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        if !self.style.is_empty() {
            let css: Vec<String> = self
                .style
                .iter()
                .map(|(p, v)| format!("{}: {}", p, v))
                .collect();
            let _ = write!(out, " style=\"{}\"", escape(&css.join("; ")));
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        for handler in &self.handlers {
            let name = match handler.trigger {
                Trigger::Click => "data-on-click",
                Trigger::PointerEnter => "data-on-pointerenter",
                Trigger::PointerLeave => "data-on-pointerleave",
            };
            let _ = write!(out, " {}=\"{}\"", name, escape(&format!("{:?}", handler.event)));
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
