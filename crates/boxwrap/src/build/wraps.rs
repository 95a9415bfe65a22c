//! Drawing the two wrap sheets from a filled-in template

use log::{debug, info};

use crate::constants::WRAP_LAYER_NAME;
use crate::layout::{CoordinateGrid, DrawStep, WrapPlan, plan_wrap, template_coordinates};
use crate::options::WrapOptions;
use crate::render::{Compositor, DefaultContext, ImageId, PausedUndo, add_guides, copy_and_rotate, fill_rect};
use crate::types::*;

/// Draw the top and bottom wrap sheets, in that order.
///
/// The options and the template size are checked before the first image is
/// created. A wrap grid whose breakpoints are not strictly increasing is
/// reported through `Compositor::message` but still drawn, as is every
/// draw step after a failing one.
pub fn build_wraps<C: Compositor + ?Sized>(
    compositor: &mut C,
    template: ImageId,
    options: &WrapOptions,
) -> Result<[ImageId; 2]> {
    options.validate()?;
    let dims = options.box_size.to_pixels();
    let material = options.material();

    let expected = template_coordinates(&dims).size();
    let actual = compositor.image_size(template)?;
    if expected != actual {
        return Err(BoxWrapError::SizeMismatch { expected, actual });
    }

    let plans = WrapHalf::ALL.map(|half| plan_wrap(half, &dims, &material));

    let mut context = DefaultContext::new(compositor);
    for plan in &plans {
        if let Err(e) = plan.grid.check_increasing() {
            context.message(&format!("{} {}: {}", WRAP_LAYER_NAME, plan.half.suffix(), e));
        }
    }
    let mut images = Vec::with_capacity(plans.len());
    for plan in &plans {
        images.push(draw_wrap(&mut *context, template, plan)?);
    }
    context.flush_displays();

    Ok([images[0], images[1]])
}

fn draw_wrap<C: Compositor + ?Sized>(
    compositor: &mut C,
    template: ImageId,
    plan: &WrapPlan,
) -> Result<ImageId> {
    let name = format!("{} {}", WRAP_LAYER_NAME, plan.half.suffix());
    let image = compositor.create_image(&name, plan.size, Fill::White);
    let mut sheet = PausedUndo::new(compositor, image);
    add_guides(&mut *sheet, image, plan.grid.xs(), plan.grid.ys())?;

    let steps = plan.steps();
    debug!("{}: {} draw steps", name, steps.len());

    let mut skipped = 0;
    for (i, step) in steps.iter().enumerate() {
        let drawn = match step {
            DrawStep::CopyFromTemplate(placement) => {
                copy_and_rotate(&mut *sheet, template, image, placement)
            }
            DrawStep::CopyWithinSheet(placement) => {
                copy_and_rotate(&mut *sheet, image, image, placement)
            }
            DrawStep::FillRect(rect) => fill_rect(&mut *sheet, image, *rect),
        };
        if let Err(e) = drawn {
            skipped += 1;
            sheet.message(&format!("{}: step {} skipped: {}", name, i + 1, e));
        }
    }

    sheet.clear_selection(image);
    sheet.display(image);
    info!(
        "{} drawn ({}, {} of {} steps)",
        name,
        plan.size,
        steps.len() - skipped,
        steps.len()
    );
    Ok(image)
}
