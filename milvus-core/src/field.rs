//! Typed columns and their conversion into wire `FieldData` records.

use std::any::type_name;
use std::io::Read;

use ndarray::Array2;
use prost::bytes::Bytes;
use tracing::trace;

use crate::error::{MilvusError, MilvusResult};
use crate::grpc_api::schema::{
    field_data, scalar_field, vector_field, BoolArray, DataType, DoubleArray, FieldData,
    FloatArray, IntArray, LongArray, ScalarField, StringArray, VectorField,
};

/// Column payload, one variant per supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Bool(Vec<bool>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    String(Vec<String>),
    /// One row per vector, one column per component.
    FloatVector(Array2<f32>),
    /// Opaque blob from raw bytes or a stream.
    Binary(Bytes),
}

impl ColumnData {
    /// Number of stored elements (vectors for `FloatVector`, bytes for `Binary`).
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Bool(v) => v.len(),
            ColumnData::Int16(v) => v.len(),
            ColumnData::Int32(v) => v.len(),
            ColumnData::Int64(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Double(v) => v.len(),
            ColumnData::String(v) => v.len(),
            ColumnData::FloatVector(block) => block.nrows(),
            ColumnData::Binary(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Element types a [`Column`] can be built from.
///
/// `data_type` is the inference step: it names the wire kind for a column of
/// `Self`, or fails for element types the wire format cannot carry.
pub trait FieldElement: Sized {
    fn data_type() -> MilvusResult<DataType>;
    fn into_column_data(values: Vec<Self>) -> MilvusResult<ColumnData>;
}

macro_rules! scalar_element {
    ($ty:ty, $kind:ident) => {
        impl FieldElement for $ty {
            fn data_type() -> MilvusResult<DataType> {
                Ok(DataType::$kind)
            }

            fn into_column_data(values: Vec<Self>) -> MilvusResult<ColumnData> {
                Ok(ColumnData::$kind(values))
            }
        }
    };
}

scalar_element!(bool, Bool);
scalar_element!(i16, Int16);
scalar_element!(i32, Int32);
scalar_element!(i64, Int64);
scalar_element!(f32, Float);
scalar_element!(f64, Double);
scalar_element!(String, String);

impl<'a> FieldElement for &'a str {
    fn data_type() -> MilvusResult<DataType> {
        Ok(DataType::String)
    }

    fn into_column_data(values: Vec<Self>) -> MilvusResult<ColumnData> {
        Ok(ColumnData::String(values.into_iter().map(str::to_owned).collect()))
    }
}

impl FieldElement for Vec<f32> {
    fn data_type() -> MilvusResult<DataType> {
        Ok(DataType::FloatVector)
    }

    fn into_column_data(values: Vec<Self>) -> MilvusResult<ColumnData> {
        let rows = values.len();
        let dim = values.first().map_or(0, Vec::len);
        if rows > 0 && dim == 0 {
            return Err(MilvusError::InvalidArgument(
                "float vectors must have at least one component".to_string(),
            ));
        }

        let mut flat = Vec::with_capacity(rows * dim);
        for vector in values {
            if vector.len() != dim {
                return Err(MilvusError::DimensionMismatch { expected: dim, actual: vector.len() });
            }
            flat.extend(vector);
        }

        let block = Array2::from_shape_vec((rows, dim), flat)
            .map_err(|e| MilvusError::InvalidArgument(format!("invalid float vector block: {}", e)))?;
        Ok(ColumnData::FloatVector(block))
    }
}

// Integer types without a lossless mapping onto the wire kinds. Int8 is a
// known Milvus kind but is rejected here as well; see `Column::to_field_data`.
macro_rules! unsupported_element {
    ($($ty:ty),*) => {
        $(
            impl FieldElement for $ty {
                fn data_type() -> MilvusResult<DataType> {
                    Err(MilvusError::UnsupportedType(type_name::<$ty>().to_string()))
                }

                fn into_column_data(_values: Vec<Self>) -> MilvusResult<ColumnData> {
                    Err(MilvusError::UnsupportedType(type_name::<$ty>().to_string()))
                }
            }
        )*
    };
}

unsupported_element!(i8, u8, u16, u32, u64);

/// A named, homogeneously typed column destined for a remote call.
///
/// The discriminant is fixed when the column is built and never recomputed.
/// Columns are immutable; encoding borrows them and may be repeated.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data_type: DataType,
    data: ColumnData,
}

impl Column {
    /// Builds a column from a typed sequence, inferring its kind from `T`.
    ///
    /// The name is only checked when the column is encoded.
    pub fn new<T: FieldElement>(name: impl Into<String>, data: Vec<T>) -> MilvusResult<Self> {
        let data_type = T::data_type()?;
        let data = T::into_column_data(data)?;
        Ok(Column { name: name.into(), data_type, data })
    }

    /// Builds a float-vector column from a list of equally sized vectors.
    pub fn from_vectors(name: impl Into<String>, vectors: Vec<Vec<f32>>) -> MilvusResult<Self> {
        Column::new(name, vectors)
    }

    /// Builds a float-vector column from a dense `(rows, dim)` block.
    pub fn from_float_block(name: impl Into<String>, block: Array2<f32>) -> MilvusResult<Self> {
        if block.nrows() > 0 && block.ncols() == 0 {
            return Err(MilvusError::InvalidArgument(
                "float vectors must have at least one component".to_string(),
            ));
        }
        Ok(Column { name: name.into(), data_type: DataType::FloatVector, data: ColumnData::FloatVector(block) })
    }

    /// Builds an opaque blob column, copying `bytes`.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> MilvusResult<Self> {
        Column::from_byte_buffer(name, Bytes::copy_from_slice(bytes))
    }

    /// Builds an opaque blob column from everything `stream` yields.
    pub fn from_stream<R: Read>(name: impl Into<String>, mut stream: R) -> MilvusResult<Self> {
        let name: String = checked_name(name.into())?;
        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer)?;
        trace!(field_name = %name, bytes = buffer.len(), "Read blob column from stream");
        Ok(Column { name, data_type: DataType::BinaryVector, data: ColumnData::Binary(Bytes::from(buffer)) })
    }

    /// Builds an opaque blob column around an existing buffer without copying.
    pub fn from_byte_buffer(name: impl Into<String>, buffer: Bytes) -> MilvusResult<Self> {
        let name: String = checked_name(name.into())?;
        Ok(Column { name, data_type: DataType::BinaryVector, data: ColumnData::Binary(buffer) })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Number of entity rows this column contributes to an insert.
    pub fn row_count(&self) -> usize {
        match &self.data {
            ColumnData::Binary(bytes) => usize::from(!bytes.is_empty()),
            other => other.len(),
        }
    }

    /// Encodes the column into its wire record.
    pub fn to_field_data(&self) -> MilvusResult<FieldData> {
        self.check()?;

        let field = match (self.data_type, &self.data) {
            (DataType::None, _) => return Err(MilvusError::InvalidDataType(DataType::None as i32)),
            (DataType::Int8, _) => {
                return Err(MilvusError::UnsupportedOperation(format!(
                    "Int8 field '{}' cannot be encoded",
                    self.name
                )))
            }
            (DataType::Bool, ColumnData::Bool(values)) => {
                scalars(scalar_field::Data::BoolData(BoolArray { data: values.clone() }))
            }
            // No 16-bit integer on the wire; widen to int32.
            (DataType::Int16, ColumnData::Int16(values)) => scalars(scalar_field::Data::IntData(IntArray {
                data: values.iter().copied().map(i32::from).collect(),
            })),
            (DataType::Int32, ColumnData::Int32(values)) => {
                scalars(scalar_field::Data::IntData(IntArray { data: values.clone() }))
            }
            (DataType::Int64, ColumnData::Int64(values)) => {
                scalars(scalar_field::Data::LongData(LongArray { data: values.clone() }))
            }
            (DataType::Float, ColumnData::Float(values)) => {
                scalars(scalar_field::Data::FloatData(FloatArray { data: values.clone() }))
            }
            (DataType::Double, ColumnData::Double(values)) => {
                scalars(scalar_field::Data::DoubleData(DoubleArray { data: values.clone() }))
            }
            (DataType::String, ColumnData::String(values)) => {
                scalars(scalar_field::Data::StringData(StringArray { data: values.clone() }))
            }
            (DataType::FloatVector, ColumnData::FloatVector(block)) => field_data::Field::Vectors(VectorField {
                dim: block.ncols() as i64,
                data: Some(vector_field::Data::FloatVector(FloatArray { data: block.iter().copied().collect() })),
            }),
            (DataType::BinaryVector, ColumnData::Binary(bytes)) => field_data::Field::Vectors(VectorField {
                dim: (bytes.len() * 8) as i64,
                data: Some(vector_field::Data::BinaryVector(bytes.to_vec())),
            }),
            (other, _) => return Err(MilvusError::InvalidDataType(other as i32)),
        };

        trace!(field_name = %self.name, data_type = ?self.data_type, rows = self.row_count(), "Encoded field data");

        Ok(FieldData {
            r#type: self.data_type as i32,
            field_name: self.name.clone(),
            field: Some(field),
            ..Default::default()
        })
    }

    fn check(&self) -> MilvusResult<()> {
        checked_name(&self.name)?;
        if self.data.is_empty() {
            return Err(MilvusError::EmptyData(self.name.clone()));
        }
        Ok(())
    }
}

fn checked_name<S: AsRef<str>>(name: S) -> MilvusResult<S> {
    if name.as_ref().is_empty() {
        return Err(MilvusError::InvalidName("field name cannot be empty".to_string()));
    }
    Ok(name)
}

fn scalars(data: scalar_field::Data) -> field_data::Field {
    field_data::Field::Scalars(ScalarField { data: Some(data) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::io::{self, Cursor};

    fn scalar_payload(field: &FieldData) -> &scalar_field::Data {
        match &field.field {
            Some(field_data::Field::Scalars(ScalarField { data: Some(data) })) => data,
            other => panic!("expected scalar payload, got {:?}", other),
        }
    }

    fn vector_payload(field: &FieldData) -> &VectorField {
        match &field.field {
            Some(field_data::Field::Vectors(vectors)) => vectors,
            other => panic!("expected vector payload, got {:?}", other),
        }
    }

    #[test]
    fn test_bool_column() -> MilvusResult<()> {
        let column = Column::new("flags", vec![true, false, true])?;
        assert_eq!(column.data_type(), DataType::Bool);

        let field = column.to_field_data()?;
        assert_eq!(field.field_name, "flags");
        assert_eq!(field.r#type(), DataType::Bool);
        assert_eq!(scalar_payload(&field), &scalar_field::Data::BoolData(BoolArray { data: vec![true, false, true] }));
        Ok(())
    }

    #[test]
    fn test_int16_is_widened_to_int32() -> MilvusResult<()> {
        let column = Column::new("small", vec![-5i16, i16::MIN, i16::MAX, 0])?;
        assert_eq!(column.data_type(), DataType::Int16);

        let field = column.to_field_data()?;
        assert_eq!(field.r#type(), DataType::Int16);
        assert_eq!(
            scalar_payload(&field),
            &scalar_field::Data::IntData(IntArray { data: vec![-5, -32768, 32767, 0] })
        );
        Ok(())
    }

    #[test]
    fn test_int32_and_int64_columns() -> MilvusResult<()> {
        let field = Column::new("i32", vec![1i32, -2, 3])?.to_field_data()?;
        assert_eq!(field.r#type(), DataType::Int32);
        assert_eq!(scalar_payload(&field), &scalar_field::Data::IntData(IntArray { data: vec![1, -2, 3] }));

        let field = Column::new("i64", vec![i64::MAX, -1])?.to_field_data()?;
        assert_eq!(field.r#type(), DataType::Int64);
        assert_eq!(scalar_payload(&field), &scalar_field::Data::LongData(LongArray { data: vec![i64::MAX, -1] }));
        Ok(())
    }

    #[test]
    fn test_float_and_double_columns_keep_exact_values() -> MilvusResult<()> {
        let field = Column::new("f", vec![0.1f32, -2.5, f32::MIN_POSITIVE])?.to_field_data()?;
        assert_eq!(field.r#type(), DataType::Float);
        assert_eq!(
            scalar_payload(&field),
            &scalar_field::Data::FloatData(FloatArray { data: vec![0.1f32, -2.5, f32::MIN_POSITIVE] })
        );

        let field = Column::new("d", vec![0.1f64, 1e300])?.to_field_data()?;
        assert_eq!(field.r#type(), DataType::Double);
        assert_eq!(scalar_payload(&field), &scalar_field::Data::DoubleData(DoubleArray { data: vec![0.1, 1e300] }));
        Ok(())
    }

    #[test]
    fn test_string_columns_from_owned_and_borrowed() -> MilvusResult<()> {
        let owned = Column::new("title", vec!["a".to_string(), "ünïcode".to_string()])?;
        let borrowed = Column::new("title", vec!["a", "ünïcode"])?;
        assert_eq!(owned, borrowed);

        let field = owned.to_field_data()?;
        assert_eq!(field.r#type(), DataType::String);
        assert_eq!(
            scalar_payload(&field),
            &scalar_field::Data::StringData(StringArray { data: vec!["a".to_string(), "ünïcode".to_string()] })
        );
        Ok(())
    }

    #[test]
    fn test_int8_rejected_at_construction() {
        let err = Column::new("tiny", vec![1i8, 2, 3]).unwrap_err();
        assert!(matches!(err, MilvusError::UnsupportedType(ref t) if t == "i8"));
    }

    #[test]
    fn test_unsigned_integers_rejected_at_construction() {
        assert!(matches!(Column::new("u", vec![1u8]), Err(MilvusError::UnsupportedType(_))));
        assert!(matches!(Column::new("u", vec![1u16]), Err(MilvusError::UnsupportedType(_))));
        assert!(matches!(Column::new("u", vec![1u32]), Err(MilvusError::UnsupportedType(_))));
        assert!(matches!(Column::new("u", vec![1u64]), Err(MilvusError::UnsupportedType(_))));
    }

    #[test]
    fn test_int8_discriminant_fails_encoding() {
        let column = Column { name: "tiny".to_string(), data_type: DataType::Int8, data: ColumnData::Int16(vec![1]) };
        assert!(matches!(column.to_field_data(), Err(MilvusError::UnsupportedOperation(_))));
    }

    #[test]
    fn test_none_discriminant_fails_encoding() {
        let column = Column { name: "x".to_string(), data_type: DataType::None, data: ColumnData::Int32(vec![1]) };
        assert!(matches!(column.to_field_data(), Err(MilvusError::InvalidDataType(0))));
    }

    #[test]
    fn test_discriminant_outside_closed_set_fails_encoding() {
        let column = Column { name: "x".to_string(), data_type: DataType::Json, data: ColumnData::String(vec!["{}".into()]) };
        assert!(matches!(column.to_field_data(), Err(MilvusError::InvalidDataType(23))));

        let mismatched = Column { name: "x".to_string(), data_type: DataType::Int64, data: ColumnData::Int32(vec![1]) };
        assert!(matches!(mismatched.to_field_data(), Err(MilvusError::InvalidDataType(5))));
    }

    #[test]
    fn test_empty_name_fails_encoding() -> MilvusResult<()> {
        let column = Column::new("", vec![1i64, 2])?;
        assert!(matches!(column.to_field_data(), Err(MilvusError::InvalidName(_))));

        let vectors = Column::from_vectors("", vec![vec![1.0, 2.0]])?;
        assert!(matches!(vectors.to_field_data(), Err(MilvusError::InvalidName(_))));
        Ok(())
    }

    #[test]
    fn test_empty_data_fails_encoding() -> MilvusResult<()> {
        let column = Column::new("x", Vec::<i32>::new())?;
        assert_eq!(column.row_count(), 0);
        assert!(matches!(column.to_field_data(), Err(MilvusError::EmptyData(ref n)) if n == "x"));

        let vectors = Column::from_vectors("v", vec![])?;
        assert!(matches!(vectors.to_field_data(), Err(MilvusError::EmptyData(_))));
        Ok(())
    }

    #[test]
    fn test_name_is_checked_before_data() -> MilvusResult<()> {
        let column = Column::new("", Vec::<bool>::new())?;
        assert!(matches!(column.to_field_data(), Err(MilvusError::InvalidName(_))));
        Ok(())
    }

    #[test]
    fn test_encoding_is_repeatable() -> MilvusResult<()> {
        let column = Column::from_vectors("embedding", vec![vec![0.5, 1.5], vec![2.5, 3.5]])?;
        let first = column.to_field_data()?;
        let second = column.to_field_data()?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_float_vectors_keep_count_and_dim() -> MilvusResult<()> {
        let vectors = vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]];
        let column = Column::from_vectors("embedding", vectors)?;
        assert_eq!(column.data_type(), DataType::FloatVector);
        assert_eq!(column.row_count(), 2);

        let field = column.to_field_data()?;
        assert_eq!(field.r#type(), DataType::FloatVector);
        let payload = vector_payload(&field);
        assert_eq!(payload.dim, 4);
        match &payload.data {
            Some(vector_field::Data::FloatVector(floats)) => {
                assert_eq!(floats.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
                assert_eq!(floats.data.len() / payload.dim as usize, 2);
            }
            other => panic!("expected float vector, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_generic_constructor_infers_float_vector() -> MilvusResult<()> {
        let column = Column::new("embedding", vec![vec![0.0f32; 3]])?;
        assert_eq!(column.data_type(), DataType::FloatVector);
        Ok(())
    }

    #[test]
    fn test_ragged_vectors_rejected() {
        let err = Column::from_vectors("v", vec![vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, MilvusError::DimensionMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_zero_length_vectors_rejected() {
        assert!(matches!(Column::from_vectors("v", vec![vec![], vec![]]), Err(MilvusError::InvalidArgument(_))));
        assert!(matches!(
            Column::from_float_block("v", Array2::zeros((2, 0))),
            Err(MilvusError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_float_block_matches_vector_list() -> MilvusResult<()> {
        let block = Column::from_float_block("v", array![[1.0f32, 2.0], [3.0, 4.0]])?;
        let list = Column::from_vectors("v", vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
        assert_eq!(block.to_field_data()?, list.to_field_data()?);
        Ok(())
    }

    #[test]
    fn test_float_block_column_major_is_encoded_row_major() -> MilvusResult<()> {
        let transposed = array![[1.0f32, 3.0], [2.0, 4.0]].reversed_axes();
        let field = Column::from_float_block("v", transposed)?.to_field_data()?;
        match &vector_payload(&field).data {
            Some(vector_field::Data::FloatVector(floats)) => assert_eq!(floats.data, vec![1.0, 2.0, 3.0, 4.0]),
            other => panic!("expected float vector, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_bytes_column_is_opaque_blob() -> MilvusResult<()> {
        let column = Column::from_bytes("blob", &[0x01, 0x02, 0x03])?;
        assert_eq!(column.data_type(), DataType::BinaryVector);
        assert_eq!(column.row_count(), 1);

        let field = column.to_field_data()?;
        assert_eq!(field.r#type(), DataType::BinaryVector);
        let payload = vector_payload(&field);
        assert_eq!(payload.dim, 24);
        assert_eq!(payload.data, Some(vector_field::Data::BinaryVector(vec![0x01, 0x02, 0x03])));
        Ok(())
    }

    #[test]
    fn test_stream_and_buffer_columns_match_bytes_column() -> MilvusResult<()> {
        let raw = [0xffu8, 0x00, 0x7f];
        let from_bytes = Column::from_bytes("blob", &raw)?;
        let from_stream = Column::from_stream("blob", Cursor::new(raw.to_vec()))?;
        let from_buffer = Column::from_byte_buffer("blob", Bytes::from_static(&[0xff, 0x00, 0x7f]))?;

        assert_eq!(from_bytes, from_stream);
        assert_eq!(from_bytes.to_field_data()?, from_buffer.to_field_data()?);
        Ok(())
    }

    #[test]
    fn test_byte_constructors_reject_empty_name() {
        assert!(matches!(Column::from_bytes("", &[1]), Err(MilvusError::InvalidName(_))));
        assert!(matches!(Column::from_stream("", Cursor::new(vec![1u8])), Err(MilvusError::InvalidName(_))));
        assert!(matches!(Column::from_byte_buffer("", Bytes::new()), Err(MilvusError::InvalidName(_))));
    }

    #[test]
    fn test_empty_blob_fails_encoding() -> MilvusResult<()> {
        let column = Column::from_bytes("blob", &[])?;
        assert_eq!(column.row_count(), 0);
        assert!(matches!(column.to_field_data(), Err(MilvusError::EmptyData(_))));
        Ok(())
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn test_stream_read_error_propagates() {
        assert!(matches!(Column::from_stream("blob", FailingReader), Err(MilvusError::Io(_))));
    }
}
