use log::debug;
use nalgebra::{Point3, Vector3};

/// Generates smooth per-vertex normals by averaging incident face normals.
///
/// Each face contributes its unit normal, computed as
/// `normalize(cross(p2 - p1, p3 - p2))` from the face's positions in index
/// order. This edge choice fixes the sign: reversing a face's winding flips
/// its contribution. Accumulation is flat (no area or angle weighting), so
/// the result is independent of the order faces are visited.
///
/// A vertex referenced by no face keeps a zero normal rather than producing
/// NaN; such vertices render unlit if anything ever points at them.
///
/// Malformed input (index count not a multiple of 3, or a face index outside
/// the vertex table) is rejected outright. Clamping an out-of-range index
/// would silently corrupt neighboring accumulators.
pub fn accumulate_vertex_normals(
    positions: &[Point3<f32>],
    indices: &[u32],
) -> Result<Vec<Vector3<f32>>, String> {
    if indices.len() % 3 != 0 {
        return Err(format!(
            "Triangle index count must be a multiple of 3, got {}",
            indices.len()
        ));
    }
    if positions.is_empty() {
        return Ok(Vec::new());
    }

    let num_vertices = positions.len();
    let num_faces = indices.len() / 3;
    let mut normals = vec![Vector3::zeros(); num_vertices];

    for i in 0..num_faces {
        let idx0 = indices[i * 3] as usize;
        let idx1 = indices[i * 3 + 1] as usize;
        let idx2 = indices[i * 3 + 2] as usize;

        if idx0 >= num_vertices || idx1 >= num_vertices || idx2 >= num_vertices {
            return Err(format!(
                "Face {i} references a vertex index outside the table (len {num_vertices})"
            ));
        }

        let p1 = positions[idx0];
        let p2 = positions[idx1];
        let p3 = positions[idx2];

        let cross = (p2 - p1).cross(&(p3 - p2));
        if cross.norm_squared() <= 1e-12 {
            // Zero-area face: no direction to contribute.
            continue;
        }
        let face_normal = cross.normalize();

        normals[idx0] += face_normal;
        normals[idx1] += face_normal;
        normals[idx2] += face_normal;
    }

    let mut zero_count = 0;
    for normal in normals.iter_mut() {
        if normal.norm_squared() > 1e-12 {
            normal.normalize_mut();
        } else {
            *normal = Vector3::zeros();
            zero_count += 1;
        }
    }

    if zero_count > 0 {
        debug!("{zero_count} vertices untouched by any face keep a zero normal");
    }

    Ok(normals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_z_triangle() -> (Vec<Point3<f32>>, Vec<u32>) {
        (
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn single_triangle_yields_plus_z_everywhere() {
        let (positions, indices) = unit_z_triangle();
        let normals = accumulate_vertex_normals(&positions, &indices).unwrap();

        for n in &normals {
            assert!((n.x).abs() < 1e-6);
            assert!((n.y).abs() < 1e-6);
            assert!((n.z - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn reversed_winding_negates_contribution() {
        let (positions, _) = unit_z_triangle();
        let normals = accumulate_vertex_normals(&positions, &[0, 2, 1]).unwrap();

        for n in &normals {
            assert!((n.z + 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn touched_vertices_have_unit_normals() {
        // Two triangles folded over the Y axis sharing edge (0, 1).
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(-1.0, 0.0, 1.0),
        ];
        let indices = vec![0, 2, 1, 0, 1, 3];

        let normals = accumulate_vertex_normals(&positions, &indices).unwrap();
        for n in &normals {
            assert!((n.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn result_is_invariant_to_face_order() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.5),
        ];
        let forward = vec![0, 1, 2, 1, 3, 2];
        let permuted = vec![1, 3, 2, 0, 1, 2];

        let a = accumulate_vertex_normals(&positions, &forward).unwrap();
        let b = accumulate_vertex_normals(&positions, &permuted).unwrap();

        for (na, nb) in a.iter().zip(&b) {
            assert!((na - nb).norm() < 1e-5);
        }
    }

    #[test]
    fn untouched_vertex_stays_zero() {
        let (mut positions, indices) = unit_z_triangle();
        positions.push(Point3::new(5.0, 5.0, 5.0)); // referenced by nothing

        let normals = accumulate_vertex_normals(&positions, &indices).unwrap();
        assert_eq!(normals.len(), 4);
        assert_eq!(normals[3], Vector3::zeros());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let (positions, _) = unit_z_triangle();
        assert!(accumulate_vertex_normals(&positions, &[0, 1, 3]).is_err());
    }

    #[test]
    fn non_triangle_index_count_is_rejected() {
        let (positions, _) = unit_z_triangle();
        assert!(accumulate_vertex_normals(&positions, &[0, 1]).is_err());
    }

    #[test]
    fn zero_area_face_contributes_nothing() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0), // collinear
        ];
        let normals = accumulate_vertex_normals(&positions, &[0, 1, 2]).unwrap();
        for n in &normals {
            assert_eq!(*n, Vector3::zeros());
        }
    }
}
