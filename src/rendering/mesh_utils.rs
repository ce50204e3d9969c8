//! Mesh construction helpers
//!
//! Pure functions that turn overlay geometry in world space into triangle
//! lists. Polygon fills go through lyon's fill tessellator with the non-zero
//! rule, so concave, self-intersecting and repeated-vertex masks all fill
//! the way an SVG polygon would.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers};

/// Segments used for handle discs
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Tessellate a closed polygon into vertex positions and triangle indices
pub fn fill_polygon(points: &[Vec2]) -> VertexBuffers<[f32; 3], u32> {
    let mut buffers = VertexBuffers::new();
    let Some((first, rest)) = points.split_first() else {
        return buffers;
    };
    if rest.len() < 2 {
        return buffers;
    }

    let mut builder = Path::builder();
    builder.begin(point(first.x, first.y));
    for p in rest {
        builder.line_to(point(p.x, p.y));
    }
    builder.end(true);
    let path = builder.build();

    let result = FillTessellator::new().tessellate_path(
        &path,
        &FillOptions::non_zero(),
        &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
            let position = vertex.position();
            [position.x, position.y, 0.0]
        }),
    );
    if let Err(e) = result {
        warn!("Failed to tessellate {}-point polygon: {:?}", points.len(), e);
        return VertexBuffers::new();
    }
    buffers
}

/// Split the segment `a`-`b` into dashes
pub fn dash_segments(a: Vec2, b: Vec2, dash: f32, gap: f32) -> Vec<(Vec2, Vec2)> {
    let length = a.distance(b);
    if length <= f32::EPSILON || dash <= 0.0 {
        return Vec::new();
    }
    let direction = (b - a) / length;
    let period = dash + gap.max(0.0);

    let mut dashes = Vec::new();
    let mut start = 0.0;
    while start < length {
        let end = (start + dash).min(length);
        dashes.push((a + direction * start, a + direction * end));
        start += period;
    }
    dashes
}

fn triangle_mesh(vertices: Vec<[f32; 3]>, indices: Vec<u32>) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        bevy::render::render_asset::RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Filled polygon mesh, or `None` when the polygon encloses no area
pub fn polygon_mesh(points: &[Vec2]) -> Option<Mesh> {
    let buffers = fill_polygon(points);
    if buffers.indices.is_empty() {
        return None;
    }
    Some(triangle_mesh(buffers.vertices, buffers.indices))
}

/// Filled disc as a triangle fan around `center`
pub fn disc_mesh(center: Vec2, radius: f32) -> Mesh {
    let mut vertices = vec![[center.x, center.y, 0.0]];
    let mut indices = Vec::new();

    for i in 0..=CIRCLE_SEGMENTS {
        let angle = (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
        vertices.push([
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
            0.0,
        ]);
    }
    for i in 0..CIRCLE_SEGMENTS {
        indices.extend_from_slice(&[0, i + 1, i + 2]);
    }

    triangle_mesh(vertices, indices)
}
