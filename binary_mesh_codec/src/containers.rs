use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::io::{Read, Write};

use crate::{ReadError, Serializable};

// Element types vary in size, so pick a more conservative value.
const MAX_INITIAL_CAPACITY: u64 = 1024;

/// Writes each element of `elements` individually without a length prefix.
/// This is the fallback for [Serializable::serialize_slice].
pub fn serialize_elements<T: Serializable, W: Write>(
    elements: &[T],
    writer: &mut W,
) -> std::io::Result<()> {
    for element in elements {
        element.serialize(writer)?;
    }
    Ok(())
}

/// Reads `count` elements individually without a length prefix.
/// This is the fallback for [Serializable::deserialize_vec].
pub fn deserialize_elements<T: Serializable, R: Read>(
    reader: &mut R,
    count: u64,
) -> Result<Vec<T>, ReadError> {
    // Reduce the risk of failed allocations due to malformed lengths.
    // This only bounds the initial capacity, so the vector still grows as needed.
    let mut elements = Vec::with_capacity(std::cmp::min(count, MAX_INITIAL_CAPACITY) as usize);
    for _ in 0..count {
        elements.push(T::deserialize(reader)?);
    }
    Ok(elements)
}

fn write_len<W: Write>(len: usize, writer: &mut W) -> std::io::Result<()> {
    (len as u64).serialize(writer)
}

impl Serializable for String {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write_len(self.len(), writer)?;
        writer.write_all(self.as_bytes())
    }

    fn deserialize<R: Read>(reader: &mut R) -> Result<Self, ReadError> {
        // Use the stored length since null bytes are valid string contents.
        let len = u64::deserialize(reader)?;
        let bytes = u8::deserialize_vec(reader, len)?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl<T: Serializable> Serializable for Vec<T> {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write_len(self.len(), writer)?;
        T::serialize_slice(self, writer)
    }

    fn deserialize<R: Read>(reader: &mut R) -> Result<Self, ReadError> {
        let count = u64::deserialize(reader)?;
        T::deserialize_vec(reader, count)
    }
}

impl<A: Serializable, B: Serializable> Serializable for (A, B) {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.0.serialize(writer)?;
        self.1.serialize(writer)
    }

    fn deserialize<R: Read>(reader: &mut R) -> Result<Self, ReadError> {
        let first = A::deserialize(reader)?;
        let second = B::deserialize(reader)?;
        Ok((first, second))
    }
}

impl<K, V, S> Serializable for HashMap<K, V, S>
where
    K: Serializable + Eq + Hash,
    V: Serializable,
    S: BuildHasher + Default,
{
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write_len(self.len(), writer)?;
        // Each entry uses the same layout as a pair.
        for (key, value) in self {
            key.serialize(writer)?;
            value.serialize(writer)?;
        }
        Ok(())
    }

    fn deserialize<R: Read>(reader: &mut R) -> Result<Self, ReadError> {
        let mut map = HashMap::with_hasher(S::default());
        map.deserialize_in_place(reader)?;
        Ok(map)
    }

    fn deserialize_in_place<R: Read>(&mut self, reader: &mut R) -> Result<(), ReadError> {
        let count = u64::deserialize(reader)?;
        self.clear();
        for _ in 0..count {
            let (key, value) = <(K, V)>::deserialize(reader)?;
            // Repeated keys keep the first value.
            self.entry(key).or_insert(value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hexlit::hex;
    use std::collections::HashSet;
    use std::io::Cursor;

    fn write_bytes<T: Serializable>(value: &T) -> Vec<u8> {
        let mut writer = Cursor::new(Vec::new());
        value.serialize(&mut writer).unwrap();
        writer.into_inner()
    }

    fn read_bytes<T: Serializable>(bytes: &[u8]) -> Result<T, ReadError> {
        let mut reader = Cursor::new(bytes);
        T::deserialize(&mut reader)
    }

    fn write_elements<T: Serializable>(elements: &[T]) -> Vec<u8> {
        let mut writer = Cursor::new(Vec::new());
        serialize_elements(elements, &mut writer).unwrap();
        writer.into_inner()
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn write_string() {
        assert_eq!(
            hex!("03000000 00000000 616263").to_vec(),
            write_bytes(&String::from("abc"))
        );
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn write_string_empty() {
        assert_eq!(
            hex!("00000000 00000000").to_vec(),
            write_bytes(&String::new())
        );
    }

    #[test]
    fn string_embedded_null() {
        let value = String::from("a\0b");
        let result: String = read_bytes(&write_bytes(&value)).unwrap();
        assert_eq!(3, result.len());
        assert_eq!(value, result);
    }

    #[test]
    fn string_invalid_utf8() {
        let mut bytes = write_bytes(&2u64);
        bytes.extend_from_slice(&[0xff, 0xfe]);
        assert!(matches!(
            read_bytes::<String>(&bytes),
            Err(ReadError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn string_truncated_contents() {
        let bytes = write_bytes(&String::from("position"));
        assert!(matches!(
            read_bytes::<String>(&bytes[..bytes.len() - 1]),
            Err(ReadError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn string_huge_length_truncated() {
        let mut bytes = write_bytes(&u64::MAX);
        bytes.extend_from_slice(b"abc");
        assert!(matches!(
            read_bytes::<String>(&bytes),
            Err(ReadError::TruncatedInput { .. })
        ));
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn write_vec_u16() {
        assert_eq!(
            hex!("03000000 00000000 01000200 0300").to_vec(),
            write_bytes(&vec![1u16, 2u16, 3u16])
        );
    }

    #[test]
    fn vec_empty() {
        let bytes = write_bytes(&Vec::<f32>::new());
        assert_eq!(8, bytes.len());
        assert_eq!(Vec::<f32>::new(), read_bytes::<Vec<f32>>(&bytes).unwrap());
    }

    #[test]
    fn vec_bulk_matches_elements() {
        let floats = vec![0.0f32, -1.5, f32::NAN, f32::INFINITY, f32::MIN_POSITIVE / 2.0];
        assert_eq!(write_elements(&floats), {
            let mut writer = Cursor::new(Vec::new());
            f32::serialize_slice(&floats, &mut writer).unwrap();
            writer.into_inner()
        });

        let indices = vec![0i32, 1, 2, -1, i32::MAX];
        let bytes = write_bytes(&indices);
        assert_eq!(write_elements(&indices), bytes[8..].to_vec());

        let bytes = write_bytes(&vec![7u8, 0u8, 255u8]);
        assert_eq!(write_elements(&[7u8, 0u8, 255u8]), bytes[8..].to_vec());
    }

    #[test]
    fn vec_bulk_read_matches_elements() {
        let values = vec![1.0f64, 2.0, -3.0, f64::NEG_INFINITY];
        let bytes = write_elements(&values);

        let bulk = f64::deserialize_vec(&mut Cursor::new(&bytes), 4).unwrap();
        let generic: Vec<f64> = deserialize_elements(&mut Cursor::new(&bytes), 4).unwrap();
        assert_eq!(bulk, generic);
        assert_eq!(values, bulk);
    }

    #[test]
    fn vec_truncated() {
        let bytes = write_bytes(&vec![1u32, 2u32, 3u32]);
        assert!(matches!(
            read_bytes::<Vec<u32>>(&bytes[..bytes.len() - 2]),
            Err(ReadError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn vec_of_strings_truncated() {
        let bytes = write_bytes(&vec![String::from("a"), String::from("bc")]);
        assert!(matches!(
            read_bytes::<Vec<String>>(&bytes[..bytes.len() - 1]),
            Err(ReadError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn nested_vec_round_trip() {
        let value = vec![vec![String::from("x")], Vec::new(), vec![String::new(); 2]];
        assert_eq!(value, read_bytes::<Vec<Vec<String>>>(&write_bytes(&value)).unwrap());
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn write_pair() {
        assert_eq!(
            hex!("01 02000000 00000000 6869").to_vec(),
            write_bytes(&(1u8, String::from("hi")))
        );
    }

    #[test]
    fn pair_round_trip() {
        let value = (String::from("uv"), vec![0.25f32, 0.75f32]);
        assert_eq!(value, read_bytes::<(String, Vec<f32>)>(&write_bytes(&value)).unwrap());
    }

    #[test]
    fn hash_map_round_trip() {
        let map: HashMap<String, Vec<i32>> = [
            (String::from("a"), vec![1, 2, 3]),
            (String::from("b"), Vec::new()),
            (String::from("c"), vec![-1]),
        ]
        .into_iter()
        .collect();

        let result: HashMap<String, Vec<i32>> = read_bytes(&write_bytes(&map)).unwrap();

        // Entry order is unspecified, so compare as sets.
        let expected: HashSet<_> = map.iter().collect();
        let actual: HashSet<_> = result.iter().collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn hash_map_empty() {
        let map = HashMap::<u32, u32>::new();
        let bytes = write_bytes(&map);
        assert_eq!(8, bytes.len());
        assert!(read_bytes::<HashMap<u32, u32>>(&bytes).unwrap().is_empty());
    }

    #[test]
    fn hash_map_in_place_clears_existing_entries() {
        let mut map: HashMap<u32, String> = [(5, String::from("old"))].into_iter().collect();

        let bytes = write_bytes(&vec![(1u32, String::from("one"))]);
        map.deserialize_in_place(&mut Cursor::new(bytes)).unwrap();

        assert_eq!(1, map.len());
        assert_eq!(Some(&String::from("one")), map.get(&1));
        assert_eq!(None, map.get(&5));
    }

    #[test]
    fn hash_map_repeated_key_keeps_first() {
        // A map has the same layout as a sequence of pairs.
        let bytes = write_bytes(&vec![(1u32, 10u32), (1u32, 20u32)]);
        let map: HashMap<u32, u32> = read_bytes(&bytes).unwrap();
        assert_eq!(1, map.len());
        assert_eq!(Some(&10), map.get(&1));
    }

    #[test]
    fn hash_map_truncated() {
        let map: HashMap<u8, u64> = [(1, 2), (3, 4)].into_iter().collect();
        let bytes = write_bytes(&map);
        assert!(matches!(
            read_bytes::<HashMap<u8, u64>>(&bytes[..bytes.len() - 3]),
            Err(ReadError::TruncatedInput { .. })
        ));
    }
}
