//! # binary_mesh_codec
//!
//! binary_mesh_codec provides the [Serializable] trait used to encode and decode the binary mesh format.
//! Scalars, strings, sequences, pairs, and maps all implement [Serializable],
//! so arbitrary nestings like `Vec<(String, HashMap<u32, Vec<f32>>)>` can be written and read
//! without any additional code.
//!
//! Values are stored in host byte order with no padding or alignment.
//! Variable length values use a [u64] length prefix.
/*!
```rust
use binary_mesh_codec::Serializable;
use std::io::Cursor;

let value = vec![(String::from("position"), vec![0.5f32, 1.0, 2.0])];

let mut writer = Cursor::new(Vec::new());
value.serialize(&mut writer).unwrap();

let mut reader = Cursor::new(writer.into_inner());
let decoded = Vec::<(String, Vec<f32>)>::deserialize(&mut reader).unwrap();
assert_eq!(value, decoded);
```
 */
//!
//! ## Derive Macros
//! Structs with named fields can derive [Serializable] to encode each field in declaration order.
/*!
```rust
use binary_mesh_codec::Serializable;

#[derive(Serializable)]
struct Attribute {
    name: String,
    values: Vec<f32>,
}
```
 */
use std::io::{Read, Write};

use thiserror::Error;

pub use binary_mesh_codec_derive::Serializable;

mod containers;
mod primitives;

pub use containers::{deserialize_elements, serialize_elements};

/// Errors while reading values with [Serializable::deserialize].
#[derive(Error, Debug)]
pub enum ReadError {
    /// The input ended before a value was completely read.
    #[error("Unexpected end of input while reading {expected} bytes.")]
    TruncatedInput { expected: usize },

    /// A guard marker did not match the expected value.
    #[error("The data is corrupted. Failed to find the guard {expected:?}.")]
    CorruptFile { expected: String },

    /// A string contained bytes that are not valid UTF-8.
    #[error(transparent)]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// An error occurred while reading from the underlying reader.
    #[error(transparent)]
    Io(std::io::Error),
}

/// A trait for types that can be written to and read from the binary mesh format.
pub trait Serializable: Sized {
    /// Writes the byte representation of `self` to `writer`.
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()>;

    /// Reads a new value from `reader`.
    /// The reader position after an error is unspecified.
    fn deserialize<R: Read>(reader: &mut R) -> Result<Self, ReadError>;

    /// Reads a value from `reader` into `self`.
    /// Containers override this to reuse their existing allocations.
    fn deserialize_in_place<R: Read>(&mut self, reader: &mut R) -> Result<(), ReadError> {
        *self = Self::deserialize(reader)?;
        Ok(())
    }

    /// Writes the elements of a sequence without the length prefix.
    /// Plain old data types override this to write the entire slice at once.
    /// The output must match [serialize_elements].
    fn serialize_slice<W: Write>(elements: &[Self], writer: &mut W) -> std::io::Result<()> {
        serialize_elements(elements, writer)
    }

    /// Reads `count` elements of a sequence without the length prefix.
    /// Plain old data types override this to read contiguous blocks of elements.
    /// The result must match [deserialize_elements].
    fn deserialize_vec<R: Read>(reader: &mut R, count: u64) -> Result<Vec<Self>, ReadError> {
        deserialize_elements(reader, count)
    }
}

/// Fills `buffer` from `reader` or fails with [ReadError::TruncatedInput] if the input ends early.
pub fn read_exact<R: Read>(reader: &mut R, buffer: &mut [u8]) -> Result<(), ReadError> {
    let expected = buffer.len();
    reader.read_exact(buffer).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => ReadError::TruncatedInput { expected },
        _ => ReadError::Io(e),
    })
}
