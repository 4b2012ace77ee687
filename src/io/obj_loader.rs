use crate::scene::mesh::{Face, Mesh};
use log::{debug, info};
use nalgebra::Point3;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a mesh.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read OBJ data: {0}")]
    Read(#[source] std::io::Error),

    #[error("malformed OBJ data: {0}")]
    Parse(#[from] tobj::LoadError),
}

/// Loads an OBJ file as positions plus polygon faces.
///
/// Polygons are kept as written (no triangulation); only `v` and `f`
/// statements matter. Indices are converted to 0-based.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    info!("Loading OBJ file: {}", path.display());

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mesh = parse_obj(&mut BufReader::new(file))?;

    let extent = mesh.extent();
    info!(
        "Model loaded: {} vertices, {} faces",
        mesh.vertices.len(),
        mesh.faces.len()
    );
    info!("Model size: {:.3} x {:.3} x {:.3}", extent.x, extent.y, extent.z);
    info!(
        "Model center: {:.3}, {:.3}, {:.3}",
        mesh.center.x, mesh.center.y, mesh.center.z
    );
    info!("Model scale: {:.4}", mesh.scale);

    Ok(mesh)
}

/// Parses OBJ text from any buffered reader. Material libraries are ignored.
///
/// The mesh keeps every `v` statement in file order, referenced or not, and
/// face indices point into that list.
pub fn parse_obj<R: BufRead>(reader: &mut R) -> Result<Mesh, LoadError> {
    let mut source = String::new();
    reader
        .read_to_string(&mut source)
        .map_err(LoadError::Read)?;

    let load_options = tobj::LoadOptions {
        triangulate: false,
        single_index: false,
        ..Default::default()
    };
    let (models, _materials) =
        tobj::load_obj_buf(&mut source.as_bytes(), &load_options, |_| Ok(Default::default()))?;

    // tobj compacts positions per sub-object; map them back to file order.
    let mut vertices = file_positions(&source);
    let mut lookup: HashMap<[u32; 3], usize> = HashMap::with_capacity(vertices.len());
    for (index, v) in vertices.iter().enumerate() {
        lookup.entry(position_key(v)).or_insert(index);
    }

    let mut faces = Vec::new();
    for model in models {
        let mesh = &model.mesh;
        let first_face = faces.len();

        let file_index: Vec<usize> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| {
                let v = Point3::new(p[0], p[1], p[2]);
                *lookup.entry(position_key(&v)).or_insert_with(|| {
                    vertices.push(v);
                    vertices.len() - 1
                })
            })
            .collect();

        let to_face =
            |indices: &[u32]| Face::new(indices.iter().map(|&i| file_index[i as usize]).collect());

        if mesh.face_arities.is_empty() {
            faces.extend(mesh.indices.chunks(3).map(to_face));
        } else {
            let mut start = 0;
            for &arity in &mesh.face_arities {
                let end = start + arity as usize;
                faces.push(to_face(&mesh.indices[start..end]));
                start = end;
            }
        }

        debug!(
            "Sub-object '{}': {} positions, {} faces",
            model.name,
            file_index.len(),
            faces.len() - first_face
        );
    }

    Ok(Mesh::new(vertices, faces))
}

/// Every `v x y z` statement, in file order.
fn file_positions(source: &str) -> Vec<Point3<f32>> {
    source
        .lines()
        .filter_map(|line| {
            let mut words = line.split_whitespace();
            if words.next() != Some("v") {
                return None;
            }
            let mut coord = || words.next()?.parse::<f32>().ok();
            Some(Point3::new(coord()?, coord()?, coord()?))
        })
        .collect()
}

fn position_key(v: &Point3<f32>) -> [u32; 3] {
    [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()]
}
