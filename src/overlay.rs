use crate::constants::{
    INFO_BUTTON_ID, INFO_CLOSE_ID, INFO_HIDE_LABEL, INFO_PANEL_ID, INFO_SHOW_LABEL,
    LOADING_CONTAINER_ID, LOADING_TEXT_ID, TOOLTIP_ID, TOOLTIP_OFFSET_PX, UI_CONTAINER_ID,
};
use crate::{controls, dom};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

// ---------------- Loading overlay ----------------

const LOADING_CONTAINER_STYLE: &str = "position:fixed;inset:0;display:flex;align-items:center;\
justify-content:center;background:#000;z-index:1000;pointer-events:none;opacity:1";
const LOADING_TEXT_STYLE: &str = "font:700 12vw/1 system-ui,sans-serif;letter-spacing:0.1em;\
color:transparent;-webkit-background-clip:text;background-clip:text";

/// Create the full-screen loading overlay with an empty fill.
pub fn mount_loading(document: &web::Document, label: &str) {
    let Some(container) = dom::ensure_element(document, LOADING_CONTAINER_ID, "div") else {
        log::warn!("[overlay] could not create loading overlay");
        return;
    };
    _ = container.set_attribute("style", LOADING_CONTAINER_STYLE);
    let text = match dom::html_element(document, LOADING_TEXT_ID) {
        Some(t) => t,
        None => {
            let Some(t) = document
                .create_element("div")
                .ok()
                .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
            else {
                return;
            };
            t.set_id(LOADING_TEXT_ID);
            _ = container.append_child(&t);
            t
        }
    };
    _ = text.set_attribute("style", LOADING_TEXT_STYLE);
    text.set_text_content(Some(label));
    update_loading(document, 0.0, 1.0);
}

/// Fill the label from the bottom up to `fill_percent` and fade the overlay.
pub fn update_loading(document: &web::Document, fill_percent: f32, opacity: f32) {
    if let Some(text) = dom::html_element(document, LOADING_TEXT_ID) {
        let p = fill_percent.clamp(0.0, 100.0);
        let gradient = format!(
            "linear-gradient(to top, #ffffff {p:.1}%, rgba(255,255,255,0.15) {p:.1}%)"
        );
        _ = text.style().set_property("background-image", &gradient);
    }
    if let Some(container) = dom::html_element(document, LOADING_CONTAINER_ID) {
        _ = container
            .style()
            .set_property("opacity", &format!("{:.3}", opacity.clamp(0.0, 1.0)));
    }
}

pub fn remove_loading(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_CONTAINER_ID) {
        el.remove();
    }
}

// ---------------- Tooltip ----------------

const TOOLTIP_STYLE: &str = "position:fixed;display:none;pointer-events:none;z-index:900;\
padding:4px 8px;border-radius:4px;background:rgba(0,0,0,0.75);color:#fff;font:12px system-ui";

pub fn mount_tooltip(document: &web::Document) {
    if let Some(el) = dom::ensure_element(document, TOOLTIP_ID, "div") {
        _ = el.set_attribute("style", TOOLTIP_STYLE);
    }
}

pub fn show_tooltip(document: &web::Document, text: &str, client: Vec2) {
    if let Some(el) = dom::html_element(document, TOOLTIP_ID) {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
        let style = el.style();
        _ = style.set_property("left", &format!("{}px", client.x + TOOLTIP_OFFSET_PX));
        _ = style.set_property("top", &format!("{}px", client.y + TOOLTIP_OFFSET_PX));
        _ = style.set_property("display", "block");
    }
}

pub fn hide_tooltip(document: &web::Document) {
    if let Some(el) = dom::html_element(document, TOOLTIP_ID) {
        _ = el.style().set_property("display", "none");
    }
}

// ---------------- Info panel ----------------

const INFO_PANEL_STYLE: &str = "position:fixed;top:60px;right:20px;max-width:320px;z-index:800;\
padding:12px 16px;border-radius:6px;background:rgba(10,10,10,0.85);color:#eee;font:13px system-ui";

/// Create the info button (inside the UI container when present) and the
/// hidden panel listing marker counts.
pub fn mount_info(document: &web::Document, potential: usize, activated: usize) {
    if document.get_element_by_id(INFO_BUTTON_ID).is_none() {
        if let Ok(button) = document.create_element("button") {
            button.set_id(INFO_BUTTON_ID);
            button.set_text_content(Some(INFO_SHOW_LABEL));
            let parent: Option<web::Node> = document
                .get_element_by_id(UI_CONTAINER_ID)
                .map(Into::into)
                .or_else(|| document.body().map(Into::into));
            if let Some(parent) = parent {
                _ = parent.append_child(&button);
            }
        }
    }
    if let Some(panel) = dom::ensure_element(document, INFO_PANEL_ID, "div") {
        _ = panel.set_attribute("style", INFO_PANEL_STYLE);
        panel.set_inner_html(&controls::info_panel_html(
            potential,
            activated,
            INFO_CLOSE_ID,
        ));
    }
    hide_info(document);
}

/// Refresh the counts once markers exist; keeps the current visibility.
pub fn update_info_counts(document: &web::Document, potential: usize, activated: usize) {
    if let Some(panel) = document.get_element_by_id(INFO_PANEL_ID) {
        panel.set_inner_html(&controls::info_panel_html(
            potential,
            activated,
            INFO_CLOSE_ID,
        ));
    }
}

#[inline]
pub fn show_info(document: &web::Document) {
    if let Some(el) = dom::html_element(document, INFO_PANEL_ID) {
        _ = el.class_list().remove_1("hidden");
        _ = el.style().set_property("display", "block");
    }
    set_info_button_label(document, INFO_HIDE_LABEL);
}

#[inline]
pub fn hide_info(document: &web::Document) {
    if let Some(el) = dom::html_element(document, INFO_PANEL_ID) {
        _ = el.class_list().add_1("hidden");
        _ = el.style().set_property("display", "none");
    }
    set_info_button_label(document, INFO_SHOW_LABEL);
}

#[inline]
pub fn is_info_hidden(document: &web::Document) -> bool {
    dom::html_element(document, INFO_PANEL_ID)
        .map(|el| el.class_list().contains("hidden"))
        .unwrap_or(true)
}

#[inline]
pub fn toggle_info(document: &web::Document) {
    if is_info_hidden(document) {
        show_info(document);
    } else {
        hide_info(document);
    }
}

fn set_info_button_label(document: &web::Document, label: &str) {
    if let Some(el) = document.get_element_by_id(INFO_BUTTON_ID) {
        el.set_text_content(Some(label));
    }
}

/// Info button toggles the panel; the close button inside it hides it. The
/// close click is caught on the panel since its contents are re-rendered.
pub fn wire_info_buttons(document: &web::Document) {
    let doc_toggle = document.clone();
    dom::add_click_listener(document, INFO_BUTTON_ID, move || toggle_info(&doc_toggle));

    if let Some(panel) = document.get_element_by_id(INFO_PANEL_ID) {
        let doc_close = document.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::Event| {
            let hit_close = ev
                .target()
                .and_then(|t| t.dyn_into::<web::Element>().ok())
                .map(|el| el.id() == INFO_CLOSE_ID)
                .unwrap_or(false);
            if hit_close {
                hide_info(&doc_close);
            }
        }) as Box<dyn FnMut(web::Event)>);
        _ = panel.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
