//! Raw 4x4 and 3x3 matrix helpers
//!
//! These are the building blocks of [`crate::AffineTransform`] and
//! [`crate::ProjectiveTransform`]. Matrices are stored column-major as
//! `m[col][row]`, which flattens directly into the layout GPU uniforms expect.

use crate::error::MathError;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// 3x3 matrix type (column-major)
pub type Mat3 = [[f32; 3]; 3];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// 3x3 identity matrix
pub const IDENTITY3: Mat3 = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for col in 0..4 {
        for row in 0..4 {
            for k in 0..4 {
                result[col][row] += a[k][row] * b[col][k];
            }
        }
    }

    result
}

/// Multiply two 3x3 matrices: result = a * b
#[allow(clippy::needless_range_loop)]
pub fn mul3(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut result = [[0.0f32; 3]; 3];

    for col in 0..3 {
        for row in 0..3 {
            for k in 0..3 {
                result[col][row] += a[k][row] * b[col][k];
            }
        }
    }

    result
}

/// Transform a homogeneous vector: result = M * v
pub fn transform(m: &Mat4, v: [f32; 4]) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    for (row, o) in out.iter_mut().enumerate() {
        *o = m[0][row] * v[0] + m[1][row] * v[1] + m[2][row] * v[2] + m[3][row] * v[3];
    }
    out
}

/// Transpose a matrix
pub fn transpose(m: &Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

/// Upper-left 3x3 block of a 4x4 matrix
pub fn upper_left(m: &Mat4) -> Mat3 {
    [
        [m[0][0], m[0][1], m[0][2]],
        [m[1][0], m[1][1], m[1][2]],
        [m[2][0], m[2][1], m[2][2]],
    ]
}

/// Embed a 3x3 block into an otherwise-identity 4x4 matrix
pub fn from_upper_left(m3: &Mat3) -> Mat4 {
    let mut m = IDENTITY;
    for col in 0..3 {
        m[col][..3].copy_from_slice(&m3[col]);
    }
    m
}

/// Flatten to 16 floats, column by column
pub fn flatten(m: &Mat4) -> [f32; 16] {
    let mut out = [0.0f32; 16];
    for (col, column) in m.iter().enumerate() {
        out[col * 4..col * 4 + 4].copy_from_slice(column);
    }
    out
}

/// Inverse of [`flatten`]
pub fn unflatten(values: &[f32; 16]) -> Mat4 {
    let mut m = [[0.0f32; 4]; 4];
    for (col, column) in m.iter_mut().enumerate() {
        column.copy_from_slice(&values[col * 4..col * 4 + 4]);
    }
    m
}

/// Flatten a 3x3 matrix to 9 floats, column by column
pub fn flatten3(m: &Mat3) -> [f32; 9] {
    let mut out = [0.0f32; 9];
    for (col, column) in m.iter().enumerate() {
        out[col * 3..col * 3 + 3].copy_from_slice(column);
    }
    out
}

/// Element at 1-based (row, col), as written in mathematical notation
pub fn element(m: &Mat4, row: usize, col: usize) -> Result<f32, MathError> {
    if !(1..=4).contains(&row) || !(1..=4).contains(&col) {
        return Err(MathError::ElementOutOfRange { row, col });
    }
    Ok(m[col - 1][row - 1])
}

/// Element at a 0-based column-major flat index
pub fn element_flat(m: &Mat4, idx: usize) -> Result<f32, MathError> {
    if idx >= 16 {
        return Err(MathError::IndexOutOfRange { index: idx, len: 16 });
    }
    Ok(m[idx / 4][idx % 4])
}

/// Check whether every element is within `epsilon` of the identity
pub fn is_identity(m: &Mat4, epsilon: f32) -> bool {
    m.iter().enumerate().all(|(col, column)| {
        column.iter().enumerate().all(|(row, &v)| {
            let expected = if col == row { 1.0 } else { 0.0 };
            (v - expected).abs() <= epsilon
        })
    })
}

/// Text dump of a matrix and its inverse
///
/// The multi-line form prints the two matrices side by side; the one-liner
/// lists each row-wise, separated by `|`.
pub fn describe(m: &Mat4, inverse: &Mat4, decimals: usize, one_liner: bool) -> String {
    let row = |mat: &Mat4, r: usize| -> String {
        (0..4)
            .map(|c| format!("{:>w$.p$}", mat[c][r], w = decimals + 4, p = decimals))
            .collect::<Vec<_>>()
            .join(" ")
    };

    if one_liner {
        let rows = |mat: &Mat4| (0..4).map(|r| row(mat, r).trim().to_string()).collect::<Vec<_>>().join("; ");
        format!("[{}] | inverse [{}]", rows(m), rows(inverse))
    } else {
        (0..4)
            .map(|r| format!("[{}]   [{}]", row(m, r), row(inverse, r)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
