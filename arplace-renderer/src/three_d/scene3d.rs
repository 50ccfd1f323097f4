//! 3D scene management

use crate::three_d::{Camera3D, Light, Material3D, Mesh3D};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node in the 3D scene graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node3D {
    /// Node name
    pub name: String,
    /// Local transform
    pub transform: Mat4,
    /// Mesh index (if this node has geometry)
    pub mesh_index: Option<usize>,
    /// Parent node index
    pub parent: Option<usize>,
    /// Children node indices
    pub children: Vec<usize>,
    /// Hidden nodes hide their whole subtree
    pub visible: bool,
}

impl Node3D {
    /// Create a new node
    pub fn new(name: String) -> Self {
        Self {
            name,
            transform: Mat4::IDENTITY,
            mesh_index: None,
            parent: None,
            children: Vec::new(),
            visible: true,
        }
    }
}

/// A complete 3D scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene3D {
    /// Scene name
    pub name: String,
    /// All nodes in the scene
    pub nodes: Vec<Node3D>,
    /// Root node indices
    pub roots: Vec<usize>,
    /// All meshes
    pub meshes: Vec<Mesh3D>,
    /// All materials
    pub materials: Vec<Material3D>,
    /// All lights
    pub lights: Vec<Light>,
    /// Active camera
    pub camera: Camera3D,
    /// Named node lookup
    node_map: HashMap<String, usize>,
}

impl Scene3D {
    /// Create a new empty scene
    pub fn new(name: String) -> Self {
        Self {
            name,
            nodes: Vec::new(),
            roots: Vec::new(),
            meshes: Vec::new(),
            materials: Vec::new(),
            lights: Vec::new(),
            camera: Camera3D::new_perspective(
                Vec3::ZERO,
                Vec3::NEG_Z,
                std::f32::consts::FRAC_PI_4,
                1.0,
            ),
            node_map: HashMap::new(),
        }
    }

    /// Add a node to the scene
    pub fn add_node(&mut self, node: Node3D) -> usize {
        let index = self.nodes.len();
        self.node_map.insert(node.name.clone(), index);
        self.nodes.push(node);
        self.roots.push(index);
        index
    }

    /// Add a child node
    pub fn add_child(&mut self, parent_index: usize, mut child: Node3D) -> Option<usize> {
        if parent_index >= self.nodes.len() {
            return None;
        }

        let child_index = self.nodes.len();
        child.parent = Some(parent_index);
        self.node_map.insert(child.name.clone(), child_index);
        self.nodes.push(child);
        self.nodes[parent_index].children.push(child_index);

        Some(child_index)
    }

    /// Add a mesh
    pub fn add_mesh(&mut self, mesh: Mesh3D) -> usize {
        let index = self.meshes.len();
        self.meshes.push(mesh);
        index
    }

    /// Add a material
    pub fn add_material(&mut self, material: Material3D) -> usize {
        let index = self.materials.len();
        self.materials.push(material);
        index
    }

    /// Add a light
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn node(&self, index: usize) -> Option<&Node3D> {
        self.nodes.get(index)
    }

    pub fn node_mut(&mut self, index: usize) -> Option<&mut Node3D> {
        self.nodes.get_mut(index)
    }

    /// Index of a node by name
    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.node_map.get(name).copied()
    }

    /// Calculate world transform for a node
    pub fn world_transform(&self, node_index: usize) -> Mat4 {
        let mut transform = Mat4::IDENTITY;
        let mut current = Some(node_index);
        while let Some(index) = current {
            match self.nodes.get(index) {
                Some(node) => {
                    transform = node.transform * transform;
                    current = node.parent;
                }
                None => break,
            }
        }
        transform
    }

    /// Whether a node and all of its ancestors are visible
    pub fn is_visible(&self, node_index: usize) -> bool {
        let mut current = Some(node_index);
        while let Some(index) = current {
            match self.nodes.get(index) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Move the contents of `other` under `parent`.
    ///
    /// Mesh and material indices of the imported nodes are rebased onto this
    /// scene. Lights and camera of `other` are dropped.
    pub fn attach_scene(&mut self, parent: usize, other: Scene3D) -> Option<()> {
        if parent >= self.nodes.len() {
            return None;
        }

        let mesh_offset = self.meshes.len();
        let material_offset = self.materials.len();
        let node_offset = self.nodes.len();

        for material in other.materials {
            self.add_material(material);
        }
        for mut mesh in other.meshes {
            mesh.material_index = mesh.material_index.map(|i| i + material_offset);
            self.add_mesh(mesh);
        }

        let imported_roots = other.roots;
        for mut node in other.nodes {
            node.mesh_index = node.mesh_index.map(|i| i + mesh_offset);
            node.parent = node.parent.map(|i| i + node_offset);
            for child in node.children.iter_mut() {
                *child += node_offset;
            }
            let index = self.nodes.len();
            self.node_map.entry(node.name.clone()).or_insert(index);
            self.nodes.push(node);
        }

        for root in imported_roots {
            let index = root + node_offset;
            self.nodes[index].parent = Some(parent);
            self.nodes[parent].children.push(index);
        }

        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_transform_walks_parents() {
        let mut scene = Scene3D::new("test".to_string());
        let mut root = Node3D::new("root".to_string());
        root.transform = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let root_idx = scene.add_node(root);

        let mut child = Node3D::new("child".to_string());
        child.transform = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0));
        let child_idx = scene.add_child(root_idx, child).unwrap();

        let world = scene.world_transform(child_idx);
        assert_eq!(world.w_axis.truncate(), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_hidden_parent_hides_child() {
        let mut scene = Scene3D::new("test".to_string());
        let root_idx = scene.add_node(Node3D::new("root".to_string()));
        let child_idx = scene.add_child(root_idx, Node3D::new("child".to_string())).unwrap();

        assert!(scene.is_visible(child_idx));
        scene.node_mut(root_idx).unwrap().visible = false;
        assert!(!scene.is_visible(child_idx));
    }

    #[test]
    fn test_attach_scene_rebases_indices() {
        let mut scene = Scene3D::new("main".to_string());
        scene.add_mesh(Mesh3D::new("existing".to_string()));
        scene.add_material(Material3D::default());
        let anchor = scene.add_node(Node3D::new("anchor".to_string()));

        let mut imported = Scene3D::new("imported".to_string());
        imported.add_material(Material3D::default());
        let mut mesh = Mesh3D::new("part".to_string());
        mesh.material_index = Some(0);
        let mesh_idx = imported.add_mesh(mesh);
        let mut part = Node3D::new("part".to_string());
        part.mesh_index = Some(mesh_idx);
        let part_idx = imported.add_node(part);
        imported.add_child(part_idx, Node3D::new("bolt".to_string()));

        scene.attach_scene(anchor, imported).unwrap();

        let part_idx = scene.node_index("part").unwrap();
        let bolt_idx = scene.node_index("bolt").unwrap();
        assert_eq!(scene.nodes[part_idx].parent, Some(anchor));
        assert_eq!(scene.nodes[part_idx].mesh_index, Some(1));
        assert_eq!(scene.meshes[1].material_index, Some(1));
        assert_eq!(scene.nodes[bolt_idx].parent, Some(part_idx));
        assert_eq!(scene.nodes[anchor].children, vec![part_idx]);
        assert_eq!(scene.roots, vec![anchor]);
    }
}
