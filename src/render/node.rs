/// A drawable node produced by a renderer; attributes only, structure is owned by the renderer.
pub trait VisualNode: Sized {
    fn set_attribute(&mut self, name: &str, value: &str);
    fn attribute(&self, name: &str) -> Option<&str>;
    fn children_mut(&mut self) -> &mut [Self];
}

/// Minimal SVG element tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvgNode {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<SvgNode>,
}

impl SvgNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl ToString) -> Self {
        self.set_attribute(name, &value.to_string());
        self
    }

    pub fn with_child(mut self, child: SvgNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends `child` and returns it in place.
    pub fn push_child(&mut self, child: SvgNode) -> &mut SvgNode {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn children(&self) -> &[SvgNode] {
        &self.children
    }

    /// Depth-first walk over this node and every descendant.
    pub fn walk(&self, visit: &mut dyn FnMut(&SvgNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        self.write_svg(&mut out, 0);
        out
    }

    fn write_svg(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }
        out.push_str(">\n");
        for child in &self.children {
            child.write_svg(out, depth + 1);
        }
        out.push_str(&indent);
        out.push_str("</");
        out.push_str(&self.tag);
        out.push_str(">\n");
    }
}

impl VisualNode for SvgNode {
    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = value.to_string(),
            None => self
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    fn children_mut(&mut self) -> &mut [Self] {
        &mut self.children
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
