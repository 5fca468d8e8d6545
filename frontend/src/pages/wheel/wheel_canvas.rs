use std::f64::consts::PI;

use log::error;
use shared::geometry::{label_layout, segment_bounds};
use shared::palette::{contrast_text_color, darken};
use shared::Category;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

const RIM_WIDTH: f64 = 8.0;
const POINTER_WIDTH: f64 = 16.0;
const POINTER_HEIGHT: f64 = 26.0;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub categories: Vec<Category>,
    pub rotation: f64,
    pub is_spinning: bool,
    pub size: u32,
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(
            (props.categories.clone(), props.rotation, props.is_spinning),
            move |(categories, rotation, is_spinning)| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    if let Err(e) = draw_wheel(&canvas, categories, *rotation, *is_spinning) {
                        error!("Failed to draw wheel: {:?}", e);
                    }
                }
                || ()
            },
        );
    }

    html! {
        <canvas
            ref={canvas_ref}
            width={props.size.to_string()}
            height={props.size.to_string()}
            class="max-w-full h-auto"
        />
    }
}

fn is_dark_mode() -> bool {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|el| el.class_list().contains("dark"))
        .unwrap_or(false)
}

fn draw_wheel(
    canvas: &HtmlCanvasElement,
    categories: &[Category],
    rotation: f64,
    is_spinning: bool,
) -> Result<(), JsValue> {
    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = width.min(height) / 2.0 - POINTER_HEIGHT;
    let dark = is_dark_mode();

    context.clear_rect(0.0, 0.0, width, height);

    // Glow
    context.begin_path();
    let glow = if is_spinning { 0.25 } else { 0.15 };
    context.set_fill_style_str(&format!("rgba(100, 130, 255, {})", glow));
    context.arc(center_x, center_y, radius + RIM_WIDTH + 6.0, 0.0, 2.0 * PI)?;
    context.fill();

    context.save();
    context.translate(center_x, center_y)?;
    context.rotate(rotation.to_radians())?;

    let count = categories.len();
    for (index, category) in categories.iter().enumerate() {
        let (start, end) = segment_bounds(index, count);
        context.begin_path();
        context.move_to(0.0, 0.0);
        context.arc(0.0, 0.0, radius, start.to_radians(), end.to_radians())?;
        context.close_path();
        context.set_fill_style_str(&category.color);
        context.fill();
        context.set_stroke_style_str(&darken(&category.color, 10.0));
        context.set_line_width(2.0);
        context.stroke();
    }

    context.set_text_align("center");
    context.set_text_baseline("middle");
    for (index, category) in categories.iter().enumerate() {
        let label = label_layout(index, count, radius);
        context.save();
        context.translate(label.x, label.y)?;
        context.rotate(label.rotation.to_radians())?;
        context.set_font(&format!(
            "bold {}px 'Segoe UI', Roboto, system-ui, sans-serif",
            label.font_size
        ));
        context.set_fill_style_str(contrast_text_color(&category.color));
        context.fill_text(&category.display_name(), 0.0, 0.0)?;
        context.restore();
    }

    context.restore();

    // Rim
    context.begin_path();
    context.set_stroke_style_str(if dark { "#e5e7eb" } else { "#1f2937" });
    context.set_line_width(RIM_WIDTH);
    context.arc(center_x, center_y, radius + RIM_WIDTH / 2.0, 0.0, 2.0 * PI)?;
    context.stroke();

    // Hub
    context.begin_path();
    context.set_fill_style_str(if dark { "#1f2937" } else { "#ffffff" });
    context.arc(center_x, center_y, radius * 0.12, 0.0, 2.0 * PI)?;
    context.fill();
    context.set_stroke_style_str(if dark { "#e5e7eb" } else { "#1f2937" });
    context.set_line_width(3.0);
    context.stroke();

    // Pointer at 12 o'clock, tip resting on the rim
    let tip_y = center_y - radius + 6.0;
    let base_y = tip_y - POINTER_HEIGHT;
    context.begin_path();
    context.move_to(center_x, tip_y);
    context.line_to(center_x - POINTER_WIDTH / 2.0, base_y);
    context.line_to(center_x + POINTER_WIDTH / 2.0, base_y);
    context.close_path();
    context.set_fill_style_str("#ef4444");
    context.fill();
    context.set_stroke_style_str("#ffffff");
    context.set_line_width(2.0);
    context.stroke();

    Ok(())
}
