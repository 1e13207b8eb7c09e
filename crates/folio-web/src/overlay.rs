use folio_core::ViewId;
use web_sys as web;

const FOOTER_TEXT_ID: &str = "hud-footer-text";

/// Shows the panel of `current` and hides every other section panel.
pub fn show_panel(document: &web::Document, current: ViewId) {
    for id in ViewId::ALL {
        let Some(el) = document.get_element_by_id(id.panel_id()) else {
            continue;
        };
        let classes = el.class_list();
        let (add, remove) = if id == current {
            ("show", "hide")
        } else {
            ("hide", "show")
        };
        let _ = classes.remove_1(remove);
        let _ = classes.add_1(add);
    }
}

#[inline]
pub fn set_footer_hint(document: &web::Document, hint: Option<&str>) {
    if let Some(el) = document.get_element_by_id(FOOTER_TEXT_ID) {
        el.set_text_content(hint);
    }
}
