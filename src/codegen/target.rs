/// The backend side of lowering.
///
/// A target builds its own representation of types and constants from bit
/// widths and signedness; the lowering functions decide which builder each IR
/// kind maps to.
pub trait Target {
    type Type;
    type Constant;

    /// An integer type of `bits` bits. Signedness lives in the operations, not
    /// in the type.
    fn int_type(&mut self, bits: u32) -> Self::Type;

    /// Native single precision.
    fn float_type(&mut self) -> Self::Type;

    /// Native double precision.
    fn double_type(&mut self) -> Self::Type;

    fn function_type(&mut self, return_type: Self::Type, arguments: Vec<Self::Type>)
    -> Self::Type;

    /// `value` holds the constant truncated to `bits` bits.
    fn int_constant(&mut self, bits: u32, value: u64, signed: bool) -> Self::Constant;

    fn float_constant(&mut self, value: f32) -> Self::Constant;

    fn double_constant(&mut self, value: f64) -> Self::Constant;
}
