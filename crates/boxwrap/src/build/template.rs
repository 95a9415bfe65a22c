//! Drawing the empty template sheet

use log::{debug, info};

use crate::constants::{LABEL_FONT_SIZE, TEMPLATE_LAYER_NAME};
use crate::layout::{CoordinateGrid, plan_template};
use crate::options::TemplateOptions;
use crate::render::{
    Compositor, DefaultContext, ImageId, PausedUndo, SelectionOp, add_guides, place_text_centered,
};
use crate::types::*;

/// Draw a transparent template with white artwork areas, guides and labels.
///
/// A label that fails to render is reported through `Compositor::message`
/// and the remaining labels are still drawn.
pub fn build_template<C: Compositor + ?Sized>(
    compositor: &mut C,
    options: &TemplateOptions,
) -> Result<ImageId> {
    options.validate()?;
    let plan = plan_template(&options.box_size);
    debug!(
        "Template plan: {} artwork regions, {} labels, {}",
        plan.artwork_regions.len(),
        plan.labels.len(),
        plan.size
    );

    let mut context = DefaultContext::new(compositor);
    let image = context.create_image(TEMPLATE_LAYER_NAME, plan.size, Fill::Transparent);
    {
        let mut sheet = PausedUndo::new(&mut *context, image);
        add_guides(&mut *sheet, image, plan.grid.xs(), plan.grid.ys())?;

        for (i, region) in plan.artwork_regions.iter().enumerate() {
            let op = if i == 0 { SelectionOp::Replace } else { SelectionOp::Add };
            sheet.select_rectangle(image, *region, op)?;
        }
        let filled = sheet.fill_selection(image, Fill::White);
        sheet.clear_selection(image);
        filled?;

        for label in &plan.labels {
            if let Err(e) =
                place_text_centered(&mut *sheet, image, &label.text, LABEL_FONT_SIZE, label.center)
            {
                sheet.message(&format!("Could not draw label {:?}: {}", label.text, e));
            }
        }
        sheet.display(image);
    }
    context.flush_displays();

    info!("Template drawn ({})", plan.size);
    Ok(image)
}
