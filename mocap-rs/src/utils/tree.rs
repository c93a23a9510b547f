//! Tree rendering for skeleton hierarchies

use console::Style;
use mocap_asf::{BoneId, Skeleton};

/// Represents a node in a tree structure
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub node_type: NodeType,
    pub children: Vec<TreeNode>,
    /// Shown in insertion order
    pub metadata: Vec<(String, String)>,
}

/// Types of nodes in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Root,
    /// Bone with at least one rotation channel
    Joint,
    /// Bone without channels
    Fixed,
}

/// Options for tree rendering
#[derive(Debug, Clone)]
pub struct TreeOptions {
    pub max_depth: Option<usize>,
    pub no_color: bool,
    pub show_metadata: bool,
    pub compact: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            no_color: false,
            show_metadata: true,
            compact: false,
        }
    }
}

impl TreeNode {
    pub fn new(name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            name: name.into(),
            node_type,
            children: Vec::new(),
            metadata: Vec::new(),
        }
    }

    pub fn add_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.push((key.to_string(), value.into()));
        self
    }

    /// Build the hierarchy of a skeleton, rooted at its `root` segment
    pub fn from_skeleton(skeleton: &Skeleton) -> Self {
        let order = skeleton
            .root
            .order
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let root = TreeNode::new("root", NodeType::Root).with_metadata("order", order);

        skeleton
            .root_bones()
            .iter()
            .fold(root, |node, &id| node.add_child(bone_node(skeleton, id)))
    }
}

fn bone_node(skeleton: &Skeleton, id: BoneId) -> TreeNode {
    let Some(bone) = skeleton.bone(id) else {
        return TreeNode::new(format!("<missing {}>", id.index()), NodeType::Fixed);
    };

    let node_type = if bone.channels().is_empty() {
        NodeType::Fixed
    } else {
        NodeType::Joint
    };
    let dof = bone
        .channels()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    let mut node = TreeNode::new(bone.name(), node_type)
        .with_metadata("length", format!("{:.3}", bone.length()));
    if !dof.is_empty() {
        node = node.with_metadata("dof", dof);
    }

    skeleton
        .children(id)
        .iter()
        .fold(node, |node, &child| node.add_child(bone_node(skeleton, child)))
}

impl NodeType {
    /// Get icon for node type
    pub fn icon(&self) -> &'static str {
        match self {
            NodeType::Root => "◉",
            NodeType::Joint => "●",
            NodeType::Fixed => "○",
        }
    }

    /// Get color style for node type
    pub fn style(&self, no_color: bool) -> Style {
        if no_color {
            Style::new()
        } else {
            match self {
                NodeType::Root => Style::new().bold().cyan(),
                NodeType::Joint => Style::new().green(),
                NodeType::Fixed => Style::new().dim(),
            }
        }
    }
}

/// Render a tree structure to string
pub fn render_tree(root: &TreeNode, options: &TreeOptions) -> String {
    let mut output = String::new();
    render_node(root, &mut output, "", true, 0, options);
    output
}

fn render_node(
    node: &TreeNode,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
    options: &TreeOptions,
) {
    if let Some(max_depth) = options.max_depth
        && depth > max_depth
    {
        return;
    }

    let style = node.node_type.style(options.no_color);
    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    let mut line = format!(
        "{prefix}{connector}{} {}",
        node.node_type.icon(),
        style.apply_to(&node.name)
    );

    if options.show_metadata && options.compact && !node.metadata.is_empty() {
        let parts: Vec<String> = node
            .metadata
            .iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect();
        line.push_str(&format!(" [{}]", parts.join(", ")));
    }

    output.push_str(&line);
    output.push('\n');

    let child_prefix = if depth == 0 {
        String::new()
    } else {
        format!("{prefix}{}", if is_last { "    " } else { "│   " })
    };

    if options.show_metadata && !options.compact {
        let meta_style = if options.no_color {
            Style::new()
        } else {
            Style::new().dim()
        };
        for (key, value) in &node.metadata {
            output.push_str(&format!(
                "{child_prefix}    {}: {value}\n",
                meta_style.apply_to(key)
            ));
        }
    }

    for (i, child) in node.children.iter().enumerate() {
        let is_last_child = i == node.children.len() - 1;
        render_node(
            child,
            output,
            &child_prefix,
            is_last_child,
            depth + 1,
            options,
        );
    }
}
