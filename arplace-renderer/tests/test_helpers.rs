//! Test helpers: fake hit-test frames, a recording overlay and surface, and
//! a tiny binary glTF builder
#![allow(dead_code)]

use arplace_core::Pose;
use arplace_renderer::ar::{HitTestFrame, HitTestResult};
use arplace_renderer::{Overlay, RenderSurface, TouchPoint, Viewport};
use glam::Vec3;

/// Stand-in for the platform hit-test source handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeSource(pub u32);

/// One frame's worth of hit-test results
#[derive(Debug, Clone, Default)]
pub struct MockFrame {
    pub results: Vec<HitTestResult>,
}

impl MockFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn hit_at(position: Vec3) -> Self {
        Self {
            results: vec![HitTestResult::new(Pose::from_translation(position))],
        }
    }

    pub fn with_results(results: Vec<HitTestResult>) -> Self {
        Self { results }
    }
}

impl HitTestFrame for MockFrame {
    type Source = FakeSource;

    fn hit_test_results(&self, _source: &FakeSource) -> Vec<HitTestResult> {
        self.results.clone()
    }
}

/// Overlay that keeps every message shown
#[derive(Debug, Default)]
pub struct RecordingOverlay {
    pub messages: Vec<String>,
}

impl RecordingOverlay {
    pub fn count(&self, text: &str) -> usize {
        self.messages.iter().filter(|m| m.as_str() == text).count()
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl Overlay for RecordingOverlay {
    fn set_text(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}

/// Surface that records each resize
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub sizes: Vec<(u32, u32)>,
}

impl RenderSurface for RecordingSurface {
    fn set_size(&mut self, viewport: &Viewport) {
        self.sizes.push(viewport.drawing_buffer_size());
    }
}

pub fn phone_viewport() -> Viewport {
    Viewport::new(390, 844, 3.0)
}

pub fn touch(id: i32, x: f32) -> TouchPoint {
    TouchPoint::new(id, x, 400.0)
}

pub fn surface_point() -> Vec3 {
    Vec3::new(0.2, -1.1, -1.5)
}

/// A single-triangle model as a binary glTF (`.glb`)
pub fn triangle_glb() -> Vec<u8> {
    triangle_glb_with_materials(None)
}

/// Same triangle, with a `materials` array in the file. The primitive
/// itself references no material.
pub fn triangle_glb_with_materials(materials: Option<&str>) -> Vec<u8> {
    let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let bin: Vec<u8> = positions.iter().flat_map(|p| p.to_le_bytes()).collect();

    let materials = materials
        .map(|json| format!(r#","materials":{}"#, json))
        .unwrap_or_default();
    let json = format!(
        concat!(
            r#"{{"asset":{{"version":"2.0"}},"scene":0,"scenes":[{{"nodes":[0]}}],"#,
            r#""nodes":[{{"name":"engine","mesh":0}}],"#,
            r#""meshes":[{{"name":"block","primitives":[{{"attributes":{{"POSITION":0}}}}]}}],"#,
            r#""accessors":[{{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","#,
            r#""min":[0.0,0.0,0.0],"max":[1.0,1.0,0.0]}}],"#,
            r#""bufferViews":[{{"buffer":0,"byteOffset":0,"byteLength":{len}}}],"#,
            r#""buffers":[{{"byteLength":{len}}}]{materials}}}"#
        ),
        len = bin.len(),
        materials = materials
    );

    glb(json.into_bytes(), bin)
}

fn pad(mut chunk: Vec<u8>, fill: u8) -> Vec<u8> {
    while chunk.len() % 4 != 0 {
        chunk.push(fill);
    }
    chunk
}

fn glb(json: Vec<u8>, bin: Vec<u8>) -> Vec<u8> {
    let json = pad(json, b' ');
    let bin = pad(bin, 0);
    let total = 12 + 8 + json.len() + 8 + bin.len();

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());

    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);

    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(b"BIN\0");
    out.extend_from_slice(&bin);
    out
}
