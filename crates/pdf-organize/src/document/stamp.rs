//! Drawing page labels into page content streams

use super::{inherited_attribute, page_rotation, resolve};
use crate::constants::{
    DEFAULT_PAGE_HEIGHT_PT, DEFAULT_PAGE_WIDTH_PT, HELVETICA_CHAR_WIDTH_RATIO,
    PAGE_NUMBER_FONT_NAME, mm_to_pt,
};
use crate::numbering::PageNumberingPlan;
use crate::options::PageNumberOptions;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Visible page rectangle in user space
#[derive(Debug, Clone, Copy, PartialEq)]
struct PageBox {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

impl PageBox {
    fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// Draw every visible label of `plan` onto the matching page.
///
/// Returns how many labels were drawn. The plan must cover exactly the
/// document's pages.
pub fn stamp_page_numbers(
    doc: &mut Document,
    plan: &PageNumberingPlan,
    options: &PageNumberOptions,
) -> Result<usize> {
    options.validate()?;

    let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
    if page_ids.len() != plan.total_pages() {
        return Err(OrganizeError::InvalidInput(format!(
            "numbering plan covers {} pages but the document has {}",
            plan.total_pages(),
            page_ids.len()
        )));
    }

    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    let font_id = doc.add_object(font_dict);

    let mut stamped = 0;
    for (label, page_id) in plan.labels().into_iter().zip(page_ids) {
        if let Some(text) = label.text {
            stamp_page(doc, page_id, &text, options, font_id)?;
            stamped += 1;
        }
    }

    log::info!(
        "Stamped {} page numbers ({} pages, style {}, format {})",
        stamped,
        plan.total_pages(),
        plan.style(),
        plan.format()
    );
    Ok(stamped)
}

fn stamp_page(
    doc: &mut Document,
    page_id: ObjectId,
    text: &str,
    options: &PageNumberOptions,
    font_id: ObjectId,
) -> Result<()> {
    let page_box = page_box(doc, page_id);
    let rotation = page_rotation(doc, page_id);
    let ops = label_operations(text, page_box, rotation, options);

    // Resources and Contents are rewritten inline on the page so shared
    // dictionaries of other pages stay untouched.
    let resources = inherited_attribute(doc, page_id, b"Resources").map(|r| resolve(doc, r));
    let mut resources = match resources {
        Some(Object::Dictionary(dict)) => dict,
        _ => Dictionary::new(),
    };
    let mut fonts = match resources.get(b"Font").ok().cloned().map(|f| resolve(doc, f)) {
        Some(Object::Dictionary(dict)) => dict,
        _ => Dictionary::new(),
    };
    fonts.set(PAGE_NUMBER_FONT_NAME, Object::Reference(font_id));
    resources.set("Font", Object::Dictionary(fonts));

    let mut contents = match doc.get_dictionary(page_id)?.get(b"Contents") {
        Ok(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Array(parts)) => parts.clone(),
            _ => vec![Object::Reference(*id)],
        },
        Ok(Object::Array(parts)) => parts.clone(),
        _ => Vec::new(),
    };

    // Existing content is wrapped in q/Q so its graphics state can't leak into the label.
    let open_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
    let label_id = doc.add_object(Stream::new(
        Dictionary::new(),
        format!("Q\n{}", ops).into_bytes(),
    ));
    contents.insert(0, Object::Reference(open_id));
    contents.push(Object::Reference(label_id));

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    page.set("Contents", Object::Array(contents));
    page.set("Resources", Object::Dictionary(resources));
    Ok(())
}

/// Visible box of the page: CropBox when present, otherwise MediaBox
fn page_box(doc: &Document, page_id: ObjectId) -> PageBox {
    [b"CropBox".as_slice(), b"MediaBox".as_slice()]
        .into_iter()
        .filter_map(|key| inherited_attribute(doc, page_id, key))
        .find_map(|value| parse_box(&resolve(doc, value)))
        .unwrap_or(PageBox {
            x0: 0.0,
            y0: 0.0,
            x1: DEFAULT_PAGE_WIDTH_PT,
            y1: DEFAULT_PAGE_HEIGHT_PT,
        })
}

fn parse_box(object: &Object) -> Option<PageBox> {
    let Object::Array(values) = object else {
        return None;
    };
    let numbers: Vec<f32> = values.iter().filter_map(as_number).collect();
    let [ax, ay, bx, by] = numbers.as_slice() else {
        return None;
    };
    Some(PageBox {
        x0: ax.min(*bx),
        y0: ay.min(*by),
        x1: ax.max(*bx),
        y1: ay.max(*by),
    })
}

fn as_number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Content stream operators drawing `text` at the configured position.
///
/// The position is computed in the page's displayed orientation and then
/// mapped back into user space, so labels on rotated pages read upright.
fn label_operations(
    text: &str,
    page_box: PageBox,
    rotation: i64,
    options: &PageNumberOptions,
) -> String {
    let font_size = options.font_size;
    let margin = mm_to_pt(options.margin_mm);
    let text_width = text.chars().count() as f32 * font_size * HELVETICA_CHAR_WIDTH_RATIO;

    let (width, height) = match rotation {
        90 | 270 => (page_box.height(), page_box.width()),
        _ => (page_box.width(), page_box.height()),
    };

    let vx = match options.position {
        Position::TopLeft | Position::BottomLeft => margin,
        Position::TopCenter | Position::BottomCenter => (width - text_width) / 2.0,
        Position::TopRight | Position::BottomRight => width - margin - text_width,
    };
    let vy = if options.position.is_top() {
        height - margin - font_size
    } else {
        margin
    };

    let w = page_box.width();
    let h = page_box.height();
    let (x, y, matrix) = match rotation {
        90 => (w - vy, vx, [0.0, 1.0, -1.0, 0.0]),
        180 => (w - vx, h - vy, [-1.0, 0.0, 0.0, -1.0]),
        270 => (vy, h - vx, [0.0, -1.0, 1.0, 0.0]),
        _ => (vx, vy, [1.0, 0.0, 0.0, 1.0]),
    };

    format!(
        "q 0 g BT /{} {} Tf {} {} {} {} {} {} Tm ({}) Tj ET Q\n",
        PAGE_NUMBER_FONT_NAME,
        font_size,
        matrix[0],
        matrix[1],
        matrix[2],
        matrix[3],
        page_box.x0 + x,
        page_box.y0 + y,
        escape_text(text)
    )
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '(' | ')' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
