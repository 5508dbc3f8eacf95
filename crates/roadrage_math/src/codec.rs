//! Binary representation of the math types
//!
//! All values are written as little-endian `f32`. Transforms store the
//! forward matrix followed by its inverse, both column-major, and are
//! validated on the way back in: a pair that does not multiply to the
//! identity is rejected instead of silently producing a broken inverse.

use std::io::{Read, Write};

use crate::error::CodecError;
use crate::mat4::{self, Mat4};
use crate::{AffineTransform, ProjectiveTransform, Quaternion, Vec3};

/// Tolerance for the `M·M⁻¹ = I` check on decode
const INVERSE_TOLERANCE: f32 = 1e-3;

/// Types with a fixed little-endian binary layout
pub trait ByteCodec: Sized {
    fn serialize<W: Write>(&self, out: &mut W) -> Result<(), CodecError>;
    fn deserialize<R: Read>(input: &mut R) -> Result<Self, CodecError>;
}

fn write_floats<W: Write>(out: &mut W, values: &[f32]) -> Result<(), CodecError> {
    for v in values {
        out.write_all(&v.to_le_bytes())?;
    }
    Ok(())
}

fn read_floats<R: Read, const N: usize>(input: &mut R) -> Result<[f32; N], CodecError> {
    let mut values = [0.0f32; N];
    let mut buf = [0u8; 4];
    for v in values.iter_mut() {
        input.read_exact(&mut buf)?;
        *v = f32::from_le_bytes(buf);
    }
    Ok(values)
}

fn read_matrix_pair<R: Read>(input: &mut R) -> Result<(Mat4, Mat4), CodecError> {
    let m = mat4::unflatten(&read_floats::<_, 16>(input)?);
    let im = mat4::unflatten(&read_floats::<_, 16>(input)?);
    if !mat4::is_identity(&mat4::mul(&m, &im), INVERSE_TOLERANCE) {
        return Err(CodecError::InconsistentInverse);
    }
    Ok((m, im))
}

impl ByteCodec for Vec3 {
    fn serialize<W: Write>(&self, out: &mut W) -> Result<(), CodecError> {
        write_floats(out, &self.to_array())
    }

    fn deserialize<R: Read>(input: &mut R) -> Result<Self, CodecError> {
        let [x, y, z] = read_floats::<_, 3>(input)?;
        Ok(Vec3::new(x, y, z))
    }
}

impl ByteCodec for Quaternion {
    fn serialize<W: Write>(&self, out: &mut W) -> Result<(), CodecError> {
        write_floats(out, &self.to_array())
    }

    fn deserialize<R: Read>(input: &mut R) -> Result<Self, CodecError> {
        let [x, y, z, w] = read_floats::<_, 4>(input)?;
        Ok(Quaternion::new(x, y, z, w))
    }
}

impl ByteCodec for AffineTransform {
    /// Writes M, M⁻¹ and a trailing flag telling whether the 3x3 inverse is valid
    fn serialize<W: Write>(&self, out: &mut W) -> Result<(), CodecError> {
        write_floats(out, &self.array16f())?;
        write_floats(out, &self.array16f_inverse())?;
        out.write_all(&[u8::from(self.has_inverse3())])?;
        Ok(())
    }

    fn deserialize<R: Read>(input: &mut R) -> Result<Self, CodecError> {
        let (m, im) = read_matrix_pair(input)?;
        let mut flag = [0u8; 1];
        input.read_exact(&mut flag)?;
        let im3 = (flag[0] != 0).then(|| mat4::upper_left(&im));
        Ok(AffineTransform::from_parts(m, im, im3))
    }
}

impl ByteCodec for ProjectiveTransform {
    fn serialize<W: Write>(&self, out: &mut W) -> Result<(), CodecError> {
        write_floats(out, &self.array16f())?;
        write_floats(out, &self.array16f_inverse())
    }

    fn deserialize<R: Read>(input: &mut R) -> Result<Self, CodecError> {
        let (m, im) = read_matrix_pair(input)?;
        Ok(ProjectiveTransform::from_parts(m, im))
    }
}
