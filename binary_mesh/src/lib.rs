//! # binary_mesh
//!
//! binary_mesh is a library for reading and writing guarded binary mesh files.
//! A [Mesh] stores an ordered list of named [Property] values,
//! each holding a flat buffer of floating point values and a flat buffer of integer indices.
//!
//! The property list is wrapped in a leading and trailing [GUARD] string.
//! Reading fails with [ReadError::CorruptFile] if either guard is missing
//! and with [ReadError::TruncatedInput] if the data ends early.
//!
//! ## Encoding
//! All reading and writing goes through the [Serializable] trait from binary_mesh_codec.
//! Values use host byte order with no padding, and variable length data uses a [u64] length prefix.
//! The float type is not stored in the file, so a `Mesh<f64>` must be read as a `Mesh<f64>`.
//!
//! ## Example
/*!
```no_run
use binary_mesh::{Mesh, Property};

# fn main() -> Result<(), Box<dyn std::error::Error>> {
// Read the file from disk.
let mut mesh = Mesh::<f32>::from_file("model.bin")?;

// Make some edits.
mesh.push_property("firstMesh", Property::new(vec![0.0, 1.0, 0.0], vec![0, 1, 2]));

// Save the changes.
mesh.write_to_file("model_new.bin")?;
# Ok(())
# }
```
 */
mod mesh;

pub use mesh::{Mesh, Property, GUARD};

pub use binary_mesh_codec::{ReadError, Serializable};

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

impl<F: Serializable> Mesh<F> {
    /// Tries to read a mesh from `path`.
    /// The entire file is buffered for performance.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadError> {
        let mut file = Cursor::new(fs::read(path).map_err(ReadError::Io)?);
        Self::deserialize(&mut file)
    }

    /// Tries to read a mesh from `reader`.
    /// For best performance when opening from a file, use `from_file` instead.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, ReadError> {
        Self::deserialize(reader)
    }

    /// Writes the mesh to `writer`.
    /// For best performance when writing to a file, use `write_to_file` instead.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.serialize(writer)
    }

    /// Writes the mesh to `path`.
    /// The entire file is buffered for performance.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut file = fs::File::create(path)?;
        write_buffered(&mut file, |c| self.serialize(c))
    }
}

fn write_buffered<W: Write, F: Fn(&mut Cursor<Vec<u8>>) -> std::io::Result<()>>(
    writer: &mut W,
    write_data: F,
) -> std::io::Result<()> {
    // Buffer the entire write operation into memory to avoid many small writes to the file.
    let mut cursor = Cursor::new(Vec::new());
    write_data(&mut cursor)?;

    writer.write_all(cursor.get_ref())?;
    Ok(())
}
