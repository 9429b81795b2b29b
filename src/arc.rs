//! Filled arc drawing for rings and hands.
//!
//! An arc is the slice of an annulus between `radius - thickness/2` and
//! `radius + thickness/2`, approximated by a fan of quadrilaterals (two
//! triangles each). Segment boundaries sit on a fixed angular grid derived
//! from the radius, so repainting a larger arc of the same geometry covers
//! every pixel of previously painted sub-arcs. The incremental dial updates
//! rely on that to erase cleanly.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Triangle},
};

use crate::angle::polar_point;

/// Angular grid step for a given radius.
///
/// Aims for a chord of a few pixels per segment; every candidate divides 6°
/// so dial-unit boundaries always land on the grid.
fn grid_step(radius: u16) -> f32 {
    const CANDIDATES: [f32; 5] = [6.0, 3.0, 2.0, 1.5, 1.0];
    let limit = 229.2 / radius.max(1) as f32;
    for candidate in CANDIDATES {
        if candidate <= limit {
            return candidate;
        }
    }
    1.0
}

/// Draw the filled arc `[start_deg, end_deg]` in screen angles.
///
/// An end angle numerically below the start marks an arc crossing the
/// 0°/360° boundary and is split into `[start, 360)` and `[0, end]`.
pub fn draw_arc<D>(
    target: &mut D,
    center: Point,
    radius: u16,
    thickness: u16,
    start_deg: f32,
    end_deg: f32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if end_deg < start_deg {
        draw_arc(target, center, radius, thickness, start_deg, 360.0, color)?;
        return draw_arc(target, center, radius, thickness, 0.0, end_deg, color);
    }
    if end_deg - start_deg <= 0.0 {
        return Ok(());
    }

    let inner = radius as f32 - thickness as f32 / 2.0;
    let outer = radius as f32 + thickness as f32 / 2.0;
    let step = grid_step(radius);

    let mut a = start_deg;
    loop {
        let next_grid = libm::floorf(a / step) * step + step;
        let b = if next_grid >= end_deg { end_deg } else { next_grid };
        fill_segment(target, center, inner, outer, a, b, color)?;
        if b >= end_deg {
            return Ok(());
        }
        a = b;
    }
}

/// Like [`draw_arc`], with small filled circles capping both extremities.
/// Caps stay inside the annulus band, so a later track repaint still
/// erases them. A full revolution needs no caps.
pub fn draw_arc_with_caps<D>(
    target: &mut D,
    center: Point,
    radius: u16,
    thickness: u16,
    start_deg: f32,
    end_deg: f32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_arc(target, center, radius, thickness, start_deg, end_deg, color)?;

    let span = if end_deg < start_deg {
        360.0 - start_deg + end_deg
    } else {
        end_deg - start_deg
    };
    if span <= 0.0 || span >= 360.0 {
        return Ok(());
    }

    let style = PrimitiveStyle::with_fill(color);
    for angle in [start_deg, end_deg] {
        let tip = polar_point(center, radius as f32, angle);
        Circle::with_center(tip, thickness as u32)
            .into_styled(style)
            .draw(target)?;
    }
    Ok(())
}

fn fill_segment<D>(
    target: &mut D,
    center: Point,
    inner: f32,
    outer: f32,
    a: f32,
    b: f32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let p1 = polar_point(center, inner, a);
    let p2 = polar_point(center, outer, a);
    let p3 = polar_point(center, outer, b);
    let p4 = polar_point(center, inner, b);

    let style = PrimitiveStyle::with_fill(color);
    Triangle::new(p1, p2, p3).into_styled(style).draw(target)?;
    Triangle::new(p1, p3, p4).into_styled(style).draw(target)
}
