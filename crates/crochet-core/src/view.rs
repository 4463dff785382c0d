//! Toy view model.
//!
//! The engine's job ends at producing a [`View`] tree and handing it to a
//! [`RenderSink`]; diffing, painting, and event delivery belong to the host.
//! The node set here is deliberately tiny: just enough to express a counter
//! with a button and a text field.

use std::fmt;
use std::rc::Rc;

pub type Callback = Rc<dyn Fn()>;
pub type TextCallback = Rc<dyn Fn(String)>;

#[derive(Clone)]
pub enum ViewKind {
    Column,
    Text {
        text: String,
    },
    Button {
        label: String,
        on_click: Option<Callback>,
    },
    Input {
        value: String,
        on_change: Option<TextCallback>,
    },
}

#[derive(Clone)]
pub struct View {
    pub kind: ViewKind,
    pub children: Vec<View>,
}

impl View {
    pub fn column(children: Vec<View>) -> View {
        View {
            kind: ViewKind::Column,
            children,
        }
    }

    pub fn text(text: impl Into<String>) -> View {
        View {
            kind: ViewKind::Text { text: text.into() },
            children: Vec::new(),
        }
    }

    pub fn button(label: impl Into<String>, on_click: impl Fn() + 'static) -> View {
        View {
            kind: ViewKind::Button {
                label: label.into(),
                on_click: Some(Rc::new(on_click)),
            },
            children: Vec::new(),
        }
    }

    pub fn input(value: impl Into<String>, on_change: impl Fn(String) + 'static) -> View {
        View {
            kind: ViewKind::Input {
                value: value.into(),
                on_change: Some(Rc::new(on_change)),
            },
            children: Vec::new(),
        }
    }

    /// Flattens the tree into one line per leaf. Buttons render as `[label]`
    /// and inputs as `(value)`; handy for sinks that print and for tests.
    pub fn text_content(&self) -> String {
        let mut lines = Vec::new();
        self.collect_text(&mut lines);
        lines.join("\n")
    }

    fn collect_text(&self, out: &mut Vec<String>) {
        match &self.kind {
            ViewKind::Column => {}
            ViewKind::Text { text } => out.push(text.clone()),
            ViewKind::Button { label, .. } => out.push(format!("[{label}]")),
            ViewKind::Input { value, .. } => out.push(format!("({value})")),
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Click handler of the first button with the given label, if any.
    pub fn find_button(&self, label: &str) -> Option<Callback> {
        if let ViewKind::Button {
            label: found,
            on_click,
        } = &self.kind
            && found == label
        {
            return on_click.clone();
        }
        self.children.iter().find_map(|c| c.find_button(label))
    }

    /// Change handler of the first input in the tree, if any.
    pub fn find_input(&self) -> Option<TextCallback> {
        if let ViewKind::Input { on_change, .. } = &self.kind {
            return on_change.clone();
        }
        self.children.iter().find_map(|c| c.find_input())
    }
}

impl fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Column => write!(f, "Column"),
            ViewKind::Text { text } => f.debug_struct("Text").field("text", text).finish(),
            ViewKind::Button { label, .. } => f
                .debug_struct("Button")
                .field("label", label)
                .finish_non_exhaustive(),
            ViewKind::Input { value, .. } => f
                .debug_struct("Input")
                .field("value", value)
                .finish_non_exhaustive(),
        }
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("kind", &self.kind)
            .field("children", &self.children)
            .finish()
    }
}

/// Where completed render passes go. The mount target (a window, a terminal,
/// a string buffer) is whatever the sink captures.
///
/// Any `FnMut(&View)` closure is a sink.
pub trait RenderSink {
    fn commit(&mut self, view: &View);
}

impl<F: FnMut(&View)> RenderSink for F {
    fn commit(&mut self, view: &View) {
        self(view)
    }
}
