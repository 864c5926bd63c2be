//! Mesh assembly buffers: interior geometry plus border-only geometry used for
//! normal accumulation.

use glam::{Vec2, Vec3};

use super::vertex_slot::VertexSlot;
use crate::types::{MeshArtifact, MeshNormals};

pub(crate) struct MeshData {
  vertices: Vec<Vec3>,
  uvs: Vec<Vec2>,
  triangles: Vec<u32>,
  border_vertices: Vec<Vec3>,
  border_triangles: Vec<[VertexSlot; 3]>,
  flat_shading: bool,
}

impl MeshData {
  pub(crate) fn new(interior_count: usize, border_count: usize, flat_shading: bool) -> Self {
    Self {
      vertices: vec![Vec3::ZERO; interior_count],
      uvs: vec![Vec2::ZERO; interior_count],
      triangles: Vec::with_capacity(interior_count * 6),
      border_vertices: vec![Vec3::ZERO; border_count],
      border_triangles: Vec::with_capacity(border_count * 2),
      flat_shading,
    }
  }

  /// Store a vertex; border vertices keep their position only.
  #[inline]
  pub(crate) fn add_vertex(&mut self, position: Vec3, uv: Vec2, slot: VertexSlot) {
    match slot {
      VertexSlot::Interior(i) => {
        self.vertices[i as usize] = position;
        self.uvs[i as usize] = uv;
      }
      VertexSlot::Border(i) => self.border_vertices[i as usize] = position,
    }
  }

  /// Route a triangle to the rendered list, or to the border list if any
  /// corner is a border vertex.
  #[inline]
  pub(crate) fn add_triangle(&mut self, a: VertexSlot, b: VertexSlot, c: VertexSlot) {
    if a.is_border() || b.is_border() || c.is_border() {
      self.border_triangles.push([a, b, c]);
      return;
    }
    if let (VertexSlot::Interior(a), VertexSlot::Interior(b), VertexSlot::Interior(c)) = (a, b, c) {
      self.triangles.extend_from_slice(&[a, b, c]);
    }
  }

  #[inline]
  fn position(&self, slot: VertexSlot) -> Vec3 {
    match slot {
      VertexSlot::Interior(i) => self.vertices[i as usize],
      VertexSlot::Border(i) => self.border_vertices[i as usize],
    }
  }

  /// Unit face normal of triangle `(a, b, c)`: `(b - a) × (c - a)`.
  #[inline]
  fn surface_normal(&self, a: VertexSlot, b: VertexSlot, c: VertexSlot) -> Vec3 {
    let pa = self.position(a);
    let pb = self.position(b);
    let pc = self.position(c);
    (pb - pa).cross(pc - pa).normalize_or_zero()
  }

  /// Accumulate face normals onto interior vertices and normalize.
  ///
  /// With `include_border`, triangles touching the padding ring also
  /// contribute to their interior corners; this is what makes normals agree
  /// across chunk seams.
  pub(crate) fn calculate_normals(&self, include_border: bool) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; self.vertices.len()];

    for tri in self.triangles.chunks_exact(3) {
      let (a, b, c) = (tri[0], tri[1], tri[2]);
      let n = self.surface_normal(
        VertexSlot::Interior(a),
        VertexSlot::Interior(b),
        VertexSlot::Interior(c),
      );
      normals[a as usize] += n;
      normals[b as usize] += n;
      normals[c as usize] += n;
    }

    if include_border {
      for &[a, b, c] in &self.border_triangles {
        let n = self.surface_normal(a, b, c);
        for slot in [a, b, c] {
          if let VertexSlot::Interior(i) = slot {
            normals[i as usize] += n;
          }
        }
      }
    }

    for n in &mut normals {
      *n = n.normalize_or_zero();
    }
    normals
  }

  /// Give every triangle corner its own vertex; indices become `0..n`.
  fn flat_shade(&mut self) {
    let vertices = self.triangles.iter().map(|&i| self.vertices[i as usize]).collect();
    let uvs = self.triangles.iter().map(|&i| self.uvs[i as usize]).collect();

    self.vertices = vertices;
    self.uvs = uvs;
    self.triangles = (0..self.triangles.len() as u32).collect();
  }

  #[cfg(test)]
  pub(crate) fn border_triangle_count(&self) -> usize {
    self.border_triangles.len()
  }

  #[cfg(test)]
  pub(crate) fn border_vertex_count(&self) -> usize {
    self.border_vertices.len()
  }

  /// Finish the mesh: flat-shade or bake normals.
  pub(crate) fn process(mut self, lod: u32) -> MeshArtifact {
    let normals = if self.flat_shading {
      self.flat_shade();
      MeshNormals::RecalculateFlat
    } else {
      let baked = self.calculate_normals(true);
      MeshNormals::Baked(baked.into_iter().map(|n| n.to_array()).collect())
    };

    MeshArtifact {
      lod,
      positions: self.vertices.into_iter().map(|v| v.to_array()).collect(),
      uvs: self.uvs.into_iter().map(|uv| uv.to_array()).collect(),
      indices: self.triangles,
      normals,
    }
  }
}
