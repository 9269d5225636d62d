use crate::foundation::error::{SlideError, SlideResult};

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    let a16 = u16::from(a);
    [
        mul_div255_u8(u16::from(r), a16),
        mul_div255_u8(u16::from(g), a16),
        mul_div255_u8(u16::from(b), a16),
        a,
    ]
}

pub(crate) fn unpremul_rgba8(px: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = px;
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let a32 = u32::from(a);
            let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a32 / 2) / a32).min(255) as u8 };
            [un(r), un(g), un(b), a]
        }
    }
}

/// Source-over of one premultiplied pixel onto another.
pub(crate) fn premul_over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for c in 0..4 {
        out[c] = src[c].saturating_add(mul_div255_u8(u16::from(dst[c]), inv));
    }
    out
}

/// Composite a premultiplied RGBA8 layer over a straight-alpha RGBA8 buffer of equal length.
///
/// Pixels under a fully transparent layer pixel are not touched, so they stay bit-exact even
/// when translucent.
pub(crate) fn over_straight_in_place(dst: &mut [u8], src_premul: &[u8]) -> SlideResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(SlideError::validation(
            "over_straight_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let below = premul_rgba8([d[0], d[1], d[2], d[3]]);
        let out = premul_over(below, [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&unpremul_rgba8(out));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
