//! The [Mesh] format stores named geometric properties for a model.
//! Each [Property] holds a flat buffer of floating point values and a flat buffer of integer indices.
//! The interpretation of these buffers such as vertex stride or face arity is left to the application.
use std::io::{Read, Write};

use binary_mesh_codec::{read_exact, ReadError, Serializable};
use log::{debug, trace};

/// The marker string written before and after the property data.
pub const GUARD: &str = "BINARY_MESH";

/// A pair of flat buffers attached to a [Mesh].
/// No relationship between the lengths of [values](#structfield.values) and [indices](#structfield.indices) is enforced.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Serializable)]
pub struct Property<F = f32> {
    /// Vertex attribute data such as positions with all components flattened.
    pub values: Vec<F>,
    /// Topology data such as triangle vertex indices.
    pub indices: Vec<i32>,
}

impl<F> Property<F> {
    pub fn new(values: Vec<F>, indices: Vec<i32>) -> Self {
        Self { values, indices }
    }
}

impl<F> Default for Property<F> {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

/// An ordered collection of named properties.
/// The float type `F` is not stored in the file, so data must be read with the same type used to write it.
/**
```rust
use binary_mesh::{Mesh, Property};
use std::io::Cursor;

let mut mesh = Mesh::<f32>::new();
mesh.push_property("position", Property::new(vec![0.0, 1.0, 2.0], vec![0]));

let mut writer = Cursor::new(Vec::new());
mesh.write(&mut writer).unwrap();

let mut reader = Cursor::new(writer.into_inner());
assert_eq!(mesh, Mesh::<f32>::read(&mut reader).unwrap());
```
 */
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<F = f32> {
    /// The properties in file order.
    /// Names are not required to be unique.
    pub properties: Vec<(String, Property<F>)>,
}

impl<F> Mesh<F> {
    /// Creates a mesh with no properties.
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    /// Appends a property after any existing properties.
    pub fn push_property<S: Into<String>>(&mut self, name: S, property: Property<F>) {
        self.properties.push((name.into(), property));
    }

    /// Finds the first property with the given `name`.
    pub fn property(&self, name: &str) -> Option<&Property<F>> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(n, _)| n.as_str())
    }
}

impl<F> Default for Mesh<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Serializable> Serializable for Mesh<F> {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write_guard(writer)?;
        self.properties.serialize(writer)?;
        write_guard(writer)
    }

    fn deserialize<R: Read>(reader: &mut R) -> Result<Self, ReadError> {
        // Any failure ends decoding immediately.
        read_guard(reader, "leading")?;

        let properties = Vec::<(String, Property<F>)>::deserialize(reader)?;
        debug!("Read {} mesh properties.", properties.len());
        for (name, property) in &properties {
            trace!(
                "Property {:?}: {} values, {} indices",
                name,
                property.values.len(),
                property.indices.len()
            );
        }

        read_guard(reader, "trailing")?;

        Ok(Self { properties })
    }
}

// Uses the same layout as a String.
fn write_guard<W: Write>(writer: &mut W) -> std::io::Result<()> {
    (GUARD.len() as u64).serialize(writer)?;
    writer.write_all(GUARD.as_bytes())
}

fn read_guard<R: Read>(reader: &mut R, position: &str) -> Result<(), ReadError> {
    let corrupt = || {
        debug!("Missing {} guard.", position);
        ReadError::CorruptFile {
            expected: GUARD.to_string(),
        }
    };

    // Checking the length first avoids reading an arbitrarily long string from corrupted data.
    let len = u64::deserialize(reader)?;
    if len != GUARD.len() as u64 {
        return Err(corrupt());
    }

    let mut bytes = [0u8; GUARD.len()];
    read_exact(reader, &mut bytes)?;
    if &bytes[..] != GUARD.as_bytes() {
        return Err(corrupt());
    }

    debug!("Found {} guard.", position);
    Ok(())
}
