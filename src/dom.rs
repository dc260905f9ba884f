use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    pub(crate) attrs: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) id_index: HashMap<String, NodeId>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    pub(crate) fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let element = Element { tag_name, attrs };
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if let Some(id_attr) = self
            .element(id)
            .and_then(|element| element.attrs.get("id").cloned())
        {
            self.id_index.insert(id_attr, id);
        }
        id
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes[node_id.0].parent
    }

    pub(crate) fn children(&self, node_id: NodeId) -> &[NodeId] {
        &self.nodes[node_id.0].children
    }

    pub(crate) fn is_descendant_of(&self, node_id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.element(node_id)
            .and_then(|element| element.attrs.get(name))
            .map(String::as_str)
    }

    pub(crate) fn has_attr(&self, node_id: NodeId, name: &str) -> bool {
        self.attr(node_id, name).is_some()
    }

    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node_id) {
            element.attrs.insert(name.to_string(), value.to_string());
            if name == "id" {
                self.id_index.insert(value.to_string(), node_id);
            }
        }
    }

    pub(crate) fn has_class(&self, node_id: NodeId, class: &str) -> bool {
        self.attr(node_id, "class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|entry| entry == class))
    }

    pub(crate) fn add_class(&mut self, node_id: NodeId, class: &str) {
        if self.has_class(node_id, class) {
            return;
        }
        let current = self.attr(node_id, "class").unwrap_or_default();
        let updated = if current.is_empty() {
            class.to_string()
        } else {
            format!("{current} {class}")
        };
        self.set_attr(node_id, "class", &updated);
    }

    pub(crate) fn remove_class(&mut self, node_id: NodeId, class: &str) {
        let Some(current) = self.attr(node_id, "class") else {
            return;
        };
        let updated = current
            .split_ascii_whitespace()
            .filter(|entry| *entry != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr(node_id, "class", &updated);
    }

    pub(crate) fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    /// Pre-order walk over every element node, in document order.
    pub(crate) fn all_elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_elements(self.root, &mut out);
        out
    }

    pub(crate) fn descendant_elements(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for child in self.children(node_id) {
            self.collect_elements(*child, &mut out);
        }
        out
    }

    fn collect_elements(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        if self.element(node_id).is_some() {
            out.push(node_id);
        }
        for child in self.children(node_id) {
            self.collect_elements(*child, out);
        }
    }

    /// A parsed fragment can lack an explicit body. Real pages get one from
    /// the browser, so the harness synthesizes it and reparents the fragment
    /// content underneath.
    pub(crate) fn ensure_body(&mut self) -> NodeId {
        if let Some(body) = self
            .all_elements()
            .into_iter()
            .find(|node| self.tag_name(*node).is_some_and(|tag| tag == "body"))
        {
            return body;
        }

        let orphans = self.nodes[self.root.0].children.clone();
        self.nodes[self.root.0].children.clear();
        let body = self.create_element(self.root, "body".to_string(), HashMap::new());
        for orphan in orphans {
            self.nodes[orphan.0].parent = Some(body);
            self.nodes[body.0].children.push(orphan);
        }
        body
    }

    /// Shallow outer-HTML rendering used in assertion failure messages.
    pub(crate) fn snippet(&self, node_id: NodeId) -> String {
        let Some(element) = self.element(node_id) else {
            return match &self.nodes[node_id.0].node_type {
                NodeType::Text(text) => format!("#text {text:?}"),
                _ => "#document".to_string(),
            };
        };

        let mut attrs = element
            .attrs
            .iter()
            .map(|(key, value)| format!(" {key}=\"{value}\""))
            .collect::<Vec<_>>();
        attrs.sort();
        let tag = &element.tag_name;
        if self.children(node_id).is_empty() {
            format!("<{tag}{}></{tag}>", attrs.concat())
        } else {
            format!("<{tag}{}>…</{tag}>", attrs.concat())
        }
    }
}
