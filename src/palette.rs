use nalgebra::Vector3;

/// color of the center sample
pub const CENTER: [u8; 3] = [0x00, 0x00, 0x00];

/// neighbor colors, assigned by position within the area
pub const NEIGHBORS: [[u8; 3]; 8] = [
    [0xff, 0x00, 0x00],
    [0xff, 0x99, 0x00],
    [0xff, 0xff, 0x00],
    [0x00, 0xff, 0x00],
    [0x00, 0xff, 0xff],
    [0x00, 0x00, 0xff],
    [0x99, 0x00, 0xff],
    [0xff, 0x00, 0xff],
];

/// color for the sample at `index` within a center-first area
///
/// areas larger than the palette reuse the last color instead of failing,
/// the excess neighbors just become indistinguishable
pub fn color_for(index: usize) -> Vector3<u8> {
    if index == 0 {
        return Vector3::from(CENTER);
    }
    let i = (index - 1).min(NEIGHBORS.len() - 1);
    return Vector3::from(NEIGHBORS[i]);
}
