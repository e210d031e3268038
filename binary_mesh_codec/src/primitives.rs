use std::io::{Read, Write};

use bytemuck::Pod;

use crate::{read_exact, ReadError, Serializable};

// Bulk reads grow the buffer one block at a time.
// A malformed length fails on the first missing block instead of allocating the entire claimed size.
const BULK_READ_BLOCK_SIZE: usize = 16 * 1024 * 1024;

fn write_pod_slice<T: Pod, W: Write>(elements: &[T], writer: &mut W) -> std::io::Result<()> {
    writer.write_all(bytemuck::cast_slice(elements))
}

fn read_pod_vec<T: Pod, R: Read>(reader: &mut R, count: u64) -> Result<Vec<T>, ReadError> {
    let block_len = std::cmp::max(BULK_READ_BLOCK_SIZE / std::mem::size_of::<T>(), 1) as u64;

    let mut elements: Vec<T> = Vec::new();
    let mut remaining = count;
    while remaining > 0 {
        let len = std::cmp::min(remaining, block_len) as usize;
        let start = elements.len();
        elements.resize(start + len, <T as bytemuck::Zeroable>::zeroed());
        read_exact(reader, bytemuck::cast_slice_mut(&mut elements[start..]))?;
        remaining -= len as u64;
    }

    Ok(elements)
}

macro_rules! serializable_scalar_impl {
    ($($ty:ty),*) => {
        $(
            impl Serializable for $ty {
                fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
                    writer.write_all(bytemuck::bytes_of(self))
                }

                fn deserialize<R: Read>(reader: &mut R) -> Result<Self, ReadError> {
                    let mut value = <$ty as bytemuck::Zeroable>::zeroed();
                    read_exact(reader, bytemuck::bytes_of_mut(&mut value))?;
                    Ok(value)
                }

                fn serialize_slice<W: Write>(
                    elements: &[Self],
                    writer: &mut W,
                ) -> std::io::Result<()> {
                    write_pod_slice(elements, writer)
                }

                fn deserialize_vec<R: Read>(
                    reader: &mut R,
                    count: u64,
                ) -> Result<Vec<Self>, ReadError> {
                    read_pod_vec(reader, count)
                }
            }
        )*
    }
}

serializable_scalar_impl!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64, half::f16);
