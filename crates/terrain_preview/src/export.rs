//! Wavefront OBJ export of chunk meshes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use terrain_plugin::MeshArtifact;

/// Write `mesh` as OBJ. Flat-shaded meshes get their face normals computed
/// here.
pub fn write_obj(mesh: &MeshArtifact, path: &Path) -> Result<()> {
  let file = File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
  let mut out = BufWriter::new(file);
  write_obj_to(mesh, &mut out).with_context(|| format!("Failed to write: {}", path.display()))?;
  out.flush()?;
  Ok(())
}

pub fn write_obj_to(mesh: &MeshArtifact, out: &mut impl Write) -> std::io::Result<()> {
  writeln!(out, "# terrain chunk, lod {}", mesh.lod)?;
  writeln!(out, "# {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count())?;

  for [x, y, z] in &mesh.positions {
    writeln!(out, "v {x} {y} {z}")?;
  }
  for [u, v] in &mesh.uvs {
    writeln!(out, "vt {u} {v}")?;
  }
  for [x, y, z] in mesh.resolved_normals() {
    writeln!(out, "vn {x} {y} {z}")?;
  }

  // OBJ indices are 1-based.
  for tri in mesh.indices.chunks_exact(3) {
    let [a, b, c] = [tri[0] + 1, tri[1] + 1, tri[2] + 1];
    writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use terrain_plugin::MeshNormals;

  #[test]
  fn test_obj_layout() {
    let mesh = MeshArtifact {
      lod: 2,
      positions: vec![[0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, -1.0]],
      uvs: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
      indices: vec![0, 2, 1],
      normals: MeshNormals::Baked(vec![[0.0, 1.0, 0.0]; 3]),
    };

    let mut buf = Vec::new();
    write_obj_to(&mesh, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 3);
    assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 3);
    assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 3);
    assert!(text.contains("f 1/1/1 3/3/3 2/2/2"));
  }
}
