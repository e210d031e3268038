use binary_mesh_codec::Serializable;
use std::io::Cursor;

pub fn test_write_read_write<T: Serializable + std::fmt::Debug>(input: &T) {
    let mut writer = Cursor::new(Vec::new());
    input.serialize(&mut writer).unwrap();
    let before = writer.into_inner();

    let mut reader = Cursor::new(before.clone());
    let output = T::deserialize(&mut reader).unwrap();

    let mut writer = Cursor::new(Vec::new());
    output.serialize(&mut writer).unwrap();
    let after = writer.into_inner();

    assert_eq!(before, after, "{:?}", input);
}
