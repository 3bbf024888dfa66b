use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

use crate::error::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str, attributes: &[(&str, String)]) -> Self {
        Element {
            tag: tag.to_owned(),
            attributes: attributes
                .iter()
                .map(|(name, value)| ((*name).to_owned(), value.clone()))
                .collect(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    /// Numeric value of an attribute such as `x` or `width`.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.attribute(name).and_then(|value| value.parse().ok())
    }
}

/// Tree of SVG elements built by the calendar, rooted in a single element.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    nodes: Vec<Element>,
}

impl Drawing {
    pub fn new(tag: &str, attributes: &[(&str, String)]) -> Self {
        Drawing {
            nodes: vec![Element::new(tag, attributes)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn create_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, String)],
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(tag, attributes));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].text = Some(text.to_owned());
    }

    pub fn element(&self, node: NodeId) -> &Element {
        &self.nodes[node.0]
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[node.0].children.iter().copied()
    }

    /// All elements below `node` in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).collect();
        stack.reverse();

        while let Some(next) = stack.pop() {
            found.push(next);
            stack.extend(self.nodes[next.0].children.iter().rev().copied());
        }

        found
    }

    pub fn descendants_with_tag(&self, node: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|&id| self.element(id).tag == tag)
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root())
            .chain(self.descendants(self.root()))
            .find(|&node| self.element(node).attribute("id") == Some(id))
    }

    pub fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        self.write_node(writer, self.root())
    }

    fn write_node<W: Write>(&self, writer: &mut Writer<W>, node: NodeId) -> Result<()> {
        let element = self.element(node);

        let mut start = BytesStart::new(element.tag.as_str());
        for (name, value) in &element.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if element.text.is_none() && element.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = &element.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for &child in &element.children {
            self.write_node(writer, child)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.tag.as_str())))?;

        Ok(())
    }
}
