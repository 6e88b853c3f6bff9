use nalgebra::Point3;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use splinter::mesh::IndexedMesh;

/// A generated mesh together with how many islands it was built from.
pub struct Soup {
    pub mesh: IndexedMesh,
    /// Number of separate patches per sub-mesh.
    pub patches_per_submesh: Vec<usize>,
}

/// Random grid patches scattered far apart, each placed in a random
/// sub-mesh. Each patch duplicates the vertices along one column (a seam)
/// and its triangles are shuffled into the sub-mesh buffer.
pub fn patch_soup(patches: usize, submeshes: usize, seed: u64) -> Soup {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut buffers: Vec<Vec<[u32; 3]>> = vec![Vec::new(); submeshes];
    let mut patches_per_submesh = vec![0; submeshes];

    for p in 0..patches {
        let w = rng.gen_range(1..6usize);
        let h = rng.gen_range(1..6usize);
        let origin = Point3::new(p as f64 * 100.0, rng.gen_range(-50.0..50.0), 0.0);
        let seam = rng.gen_range(0..=w);

        let base = positions.len();
        for j in 0..=h {
            for i in 0..=w {
                positions.push(origin + nalgebra::Vector3::new(i as f64, j as f64, 0.0));
            }
        }
        let seam_base = positions.len();
        for j in 0..=h {
            positions.push(origin + nalgebra::Vector3::new(seam as f64, j as f64, 0.0));
        }

        let vertex = |i: usize, j: usize, right: bool| -> u32 {
            if right && i == seam {
                (seam_base + j) as u32
            } else {
                (base + j * (w + 1) + i) as u32
            }
        };

        let target = rng.gen_range(0..submeshes);
        patches_per_submesh[target] += 1;
        for j in 0..h {
            for i in 0..w {
                let right = i >= seam;
                let v00 = vertex(i, j, right);
                let v10 = vertex(i + 1, j, right);
                let v01 = vertex(i, j + 1, right);
                let v11 = vertex(i + 1, j + 1, right);
                buffers[target].push([v00, v10, v11]);
                buffers[target].push([v00, v11, v01]);
            }
        }
    }

    let mut mesh = IndexedMesh::new(positions);
    for mut triangles in buffers {
        triangles.shuffle(&mut rng);
        mesh.add_submesh(triangles.into_iter().flatten().collect());
    }

    Soup {
        mesh,
        patches_per_submesh,
    }
}

/// Shuffle the vertex buffer and renumber all indices to match.
///
/// Returns the relabelled mesh and `new_of_old`, the new index of every
/// original vertex.
pub fn relabel(mesh: &IndexedMesh, seed: u64) -> (IndexedMesh, Vec<u32>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n = mesh.num_vertices();

    let mut old_of_new: Vec<usize> = (0..n).collect();
    old_of_new.shuffle(&mut rng);

    let mut new_of_old = vec![0u32; n];
    for (new, &old) in old_of_new.iter().enumerate() {
        new_of_old[old] = new as u32;
    }

    let positions = old_of_new.iter().map(|&old| mesh.positions()[old]).collect();
    let mut relabelled = IndexedMesh::new(positions);
    for indices in mesh.submeshes() {
        relabelled.add_submesh(indices.iter().map(|&i| new_of_old[i as usize]).collect());
    }

    (relabelled, new_of_old)
}

/// Shuffle the triangle order of every sub-mesh.
pub fn shuffle_triangles(mesh: &IndexedMesh, seed: u64) -> IndexedMesh {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut shuffled = IndexedMesh::new(mesh.positions().to_vec());
    for indices in mesh.submeshes() {
        let mut triangles: Vec<[u32; 3]> = indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();
        triangles.shuffle(&mut rng);
        shuffled.add_submesh(triangles.into_iter().flatten().collect());
    }
    shuffled
}
