//! glTF 2.0 model loader

use crate::primitives::Color;
use crate::three_d::scene3d::Node3D;
use crate::three_d::{Material3D, Mesh3D, Scene3D, Vertex3D};
use anyhow::{Context, Result};
use glam::{Mat4, Vec2, Vec3};
use gltf::Gltf;
use std::path::Path;

/// Decode an in-memory binary glTF (`.glb`) into a Scene3D.
///
/// Only the embedded binary chunk is available here, so buffers that point
/// at external URIs are rejected.
pub fn load_glb(name: &str, bytes: &[u8]) -> Result<Scene3D> {
    let gltf = Gltf::from_slice(bytes).context("Failed to parse glTF data")?;
    let buffer_data = load_buffers(&gltf, None)?;
    build_scene(name, &gltf, &buffer_data)
}

/// Load a glTF file (binary or JSON with sidecar buffers) into a Scene3D
pub fn load_gltf<P: AsRef<Path>>(path: P) -> Result<Scene3D> {
    let path = path.as_ref();
    let gltf = Gltf::open(path).context("Failed to open glTF file")?;
    let buffer_data = load_buffers(&gltf, Some(path))?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Imported");
    build_scene(name, &gltf, &buffer_data)
}

fn build_scene(name: &str, gltf: &Gltf, buffer_data: &[Vec<u8>]) -> Result<Scene3D> {
    let mut scene = Scene3D::new(name.to_string());

    // Load materials
    for gltf_material in gltf.materials() {
        let material = convert_material(gltf_material);
        scene.add_material(material);
    }

    // Primitives without a material use the glTF default material
    let default_material = scene.add_material(Material3D::default());

    // One Mesh3D per primitive; remember where each glTF mesh starts
    let mut mesh_starts = Vec::new();
    for gltf_mesh in gltf.meshes() {
        mesh_starts.push(scene.meshes.len());
        for primitive in gltf_mesh.primitives() {
            let mesh =
                convert_primitive(gltf_mesh.name(), &primitive, buffer_data, default_material)?;
            scene.add_mesh(mesh);
        }
    }

    // Load scene graph
    if let Some(gltf_scene) = gltf.default_scene().or_else(|| gltf.scenes().next()) {
        for node in gltf_scene.nodes() {
            load_node(&node, &mut scene, None, &mesh_starts)?;
        }
    }

    Ok(scene)
}

/// Load all buffer data
fn load_buffers(gltf: &Gltf, base_path: Option<&Path>) -> Result<Vec<Vec<u8>>> {
    let mut buffer_data = Vec::new();

    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                if let Some(blob) = gltf.blob.as_deref() {
                    buffer_data.push(blob.to_vec());
                } else {
                    anyhow::bail!("Missing binary blob");
                }
            }
            gltf::buffer::Source::Uri(uri) => {
                let base_path = base_path
                    .with_context(|| format!("External buffer '{}' needs a base path", uri))?;
                let buffer_path = base_path.parent().unwrap_or(Path::new(".")).join(uri);
                let data = std::fs::read(&buffer_path)
                    .with_context(|| format!("Failed to read buffer: {}", buffer_path.display()))?;
                buffer_data.push(data);
            }
        }
    }

    Ok(buffer_data)
}

/// Convert a glTF material to our Material3D
fn convert_material(gltf_material: gltf::Material) -> Material3D {
    let pbr = gltf_material.pbr_metallic_roughness();

    let base_color = pbr.base_color_factor();
    let base_color = Color::new(base_color[0], base_color[1], base_color[2], base_color[3]);

    let emissive = gltf_material.emissive_factor();
    let emissive_color = Color::new(emissive[0], emissive[1], emissive[2], 1.0);

    let mut material = Material3D::new_pbr(
        gltf_material.name().unwrap_or("Material").to_string(),
        base_color,
        pbr.metallic_factor(),
        pbr.roughness_factor(),
    );

    if let crate::three_d::material::MaterialType::PBR { ref mut emissive, .. } =
        material.material_type
    {
        *emissive = emissive_color;
    }

    if let gltf::material::AlphaMode::Blend = gltf_material.alpha_mode() {
        material.opacity = base_color.a;
    }

    material.double_sided = gltf_material.double_sided();

    material
}

/// Convert a glTF primitive to our Mesh3D
fn convert_primitive(
    mesh_name: Option<&str>,
    primitive: &gltf::Primitive,
    buffer_data: &[Vec<u8>],
    default_material: usize,
) -> Result<Mesh3D> {
    let reader = primitive.reader(|buffer| buffer_data.get(buffer.index()).map(Vec::as_slice));

    let mut mesh = Mesh3D::new(mesh_name.unwrap_or("Primitive").to_string());

    // Read positions (required)
    let positions = reader
        .read_positions()
        .context("Mesh primitive missing positions")?
        .collect::<Vec<_>>();

    let normals: Vec<[f32; 3]> = match reader.read_normals() {
        Some(normals) => normals.collect(),
        None => vec![[0.0, 1.0, 0.0]; positions.len()],
    };

    let tex_coords: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
        Some(coords) => coords.into_f32().collect(),
        None => vec![[0.0, 0.0]; positions.len()],
    };

    let colors: Option<Vec<[f32; 4]>> = reader
        .read_colors(0)
        .map(|colors| colors.into_rgba_f32().collect());

    for (i, position) in positions.iter().enumerate() {
        let position = Vec3::from(*position);
        let normal = normals.get(i).copied().map(Vec3::from).unwrap_or(Vec3::Y);
        let tex_coord = tex_coords.get(i).copied().map(Vec2::from).unwrap_or(Vec2::ZERO);

        let vertex = match colors.as_ref().and_then(|c| c.get(i)) {
            Some(color) => Vertex3D::with_color(position, normal, tex_coord, *color),
            None => Vertex3D::new(position, normal, tex_coord),
        };

        mesh.vertices.push(vertex);
    }

    mesh.indices = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        // Non-indexed geometry
        None => (0..mesh.vertices.len() as u32).collect(),
    };

    mesh.material_index = Some(primitive.material().index().unwrap_or(default_material));

    Ok(mesh)
}

/// Load a node and its children
fn load_node(
    gltf_node: &gltf::Node,
    scene: &mut Scene3D,
    parent_index: Option<usize>,
    mesh_starts: &[usize],
) -> Result<usize> {
    let mut node = Node3D::new(gltf_node.name().unwrap_or("Node").to_string());

    let (translation, rotation, scale) = gltf_node.transform().decomposed();
    node.transform = Mat4::from_scale_rotation_translation(
        Vec3::from(scale),
        glam::Quat::from_array(rotation),
        Vec3::from(translation),
    );

    // Only the first primitive is bound to the node itself; additional
    // primitives become child nodes sharing its transform.
    let primitive_range = gltf_node.mesh().and_then(|gltf_mesh| {
        let start = *mesh_starts.get(gltf_mesh.index())?;
        Some(start..start + gltf_mesh.primitives().len())
    });
    if let Some(range) = primitive_range.clone() {
        node.mesh_index = Some(range.start);
    }

    let node_index = match parent_index {
        Some(parent) => scene
            .add_child(parent, node)
            .ok_or_else(|| anyhow::anyhow!("Failed to add child node"))?,
        None => scene.add_node(node),
    };

    if let Some(range) = primitive_range {
        for mesh_index in range.skip(1) {
            let mut extra = Node3D::new(format!("{}#{}", scene.nodes[node_index].name, mesh_index));
            extra.mesh_index = Some(mesh_index);
            scene.add_child(node_index, extra);
        }
    }

    for child in gltf_node.children() {
        load_node(&child, scene, Some(node_index), mesh_starts)?;
    }

    Ok(node_index)
}
