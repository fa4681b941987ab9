use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdf_organize::*;

/// Build a document whose page `i` is `100 + i` points wide, so pages can be
/// told apart after reordering.
fn create_test_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for i in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(100 + i as i64),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

/// Two pages under an intermediate `/Pages` node that carries the
/// MediaBox and a 180° rotation for both.
fn create_nested_pdf() -> Document {
    let mut doc = Document::with_version("1.7");
    let root_id = doc.new_object_id();
    let branch_id = doc.new_object_id();

    let mut kids = Vec::new();
    for _ in 0..2 {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(branch_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let branch = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Parent", Object::Reference(root_id)),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(2)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(300),
                Object::Integer(400),
            ]),
        ),
        ("Rotate", Object::Integer(180)),
        ("Resources", Object::Dictionary(Dictionary::new())),
    ]);
    doc.objects.insert(branch_id, Object::Dictionary(branch));

    let root = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(branch_id)])),
        ("Count", Object::Integer(2)),
    ]);
    doc.objects.insert(root_id, Object::Dictionary(root));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(root_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

fn page_widths(doc: &Document) -> Vec<i64> {
    page_ids(doc)
        .into_iter()
        .map(|id| {
            let page = doc.get_dictionary(id).unwrap();
            page.get(b"MediaBox").unwrap().as_array().unwrap()[2]
                .as_i64()
                .unwrap()
        })
        .collect()
}

fn rotations(doc: &Document) -> Vec<i64> {
    page_ids(doc)
        .into_iter()
        .map(|id| {
            let page = doc.get_dictionary(id).unwrap();
            page.get(b"Rotate").unwrap().as_i64().unwrap()
        })
        .collect()
}

fn stream_text(doc: &Document, object: &Object) -> String {
    let id = object.as_reference().unwrap();
    let stream = doc.get_object(id).unwrap().as_stream().unwrap();
    String::from_utf8_lossy(&stream.content).into_owned()
}

#[test]
fn test_organize_reorders_rotates_and_drops() {
    let source = create_test_pdf(5);
    let mut editor = PageSequenceEditor::load(page_count(&source)).unwrap();
    editor.move_to(4, 0).unwrap();
    editor.set_rotation(2, 90).unwrap();
    editor.mark_deleted([1]).unwrap();
    let order = editor.finalize().unwrap();

    let output = apply_organization(&source, order).unwrap();

    assert_eq!(page_count(&output), 4);
    assert_eq!(page_widths(&output), vec![104, 100, 102, 103]);
    assert_eq!(rotations(&output), vec![0, 0, 90, 0]);

    // Source document is left alone
    assert_eq!(page_widths(&source), vec![100, 101, 102, 103, 104]);
}

#[test]
fn test_organize_adds_delta_to_existing_rotation() {
    let mut source = create_test_pdf(2);
    let first = page_ids(&source)[0];
    source
        .get_object_mut(first)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("Rotate", Object::Integer(90));

    let mut editor = PageSequenceEditor::load(2).unwrap();
    editor.set_rotation(0, 270).unwrap();
    editor.set_rotation(1, 180).unwrap();
    let output = apply_organization(&source, editor.finalize().unwrap()).unwrap();

    assert_eq!(rotations(&output), vec![0, 180]);
}

#[test]
fn test_organize_flattens_inherited_attributes() {
    let source = create_nested_pdf();
    let mut editor = PageSequenceEditor::load(2).unwrap();
    editor.move_to(1, 0).unwrap();
    editor.set_rotation(1, 90).unwrap();
    let output = apply_organization(&source, editor.finalize().unwrap()).unwrap();

    let root_id = {
        let catalog_id = output.trailer.get(b"Root").unwrap().as_reference().unwrap();
        let catalog = output.get_dictionary(catalog_id).unwrap();
        catalog.get(b"Pages").unwrap().as_reference().unwrap()
    };

    assert_eq!(page_widths(&output), vec![300, 300]);
    assert_eq!(rotations(&output), vec![270, 180]);
    for id in page_ids(&output) {
        let page = output.get_dictionary(id).unwrap();
        assert_eq!(page.get(b"Parent").unwrap().as_reference().unwrap(), root_id);
        assert!(page.has(b"Resources"));
    }

    let root = output.get_dictionary(root_id).unwrap();
    assert_eq!(root.get(b"Count").unwrap().as_i64().unwrap(), 2);
}

#[test]
fn test_organize_unknown_page() {
    let source = create_test_pdf(2);
    let mut editor = PageSequenceEditor::load(3).unwrap();
    let order = editor.finalize().unwrap();

    assert!(matches!(
        apply_organization(&source, order),
        Err(OrganizeError::NotFound(2))
    ));
}

#[test]
fn test_organize_empty_order() {
    let source = create_test_pdf(2);
    assert!(matches!(
        apply_organization(&source, &[]),
        Err(OrganizeError::EmptyResult)
    ));
}

#[test]
fn test_stamp_page_numbers() {
    let mut doc = create_test_pdf(3);
    let options = PageNumberOptions {
        skip: [2].into_iter().collect(),
        format: NumberFormat::Brackets,
        ..Default::default()
    };
    let plan = PageNumberingPlan::new(3, &options);

    let stamped = stamp_page_numbers(&mut doc, &plan, &options).unwrap();
    assert_eq!(stamped, 2);

    let ids = page_ids(&doc);

    let first = doc.get_dictionary(ids[0]).unwrap();
    let contents = first.get(b"Contents").unwrap().as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(stream_text(&doc, &contents[0]), "q\n");
    assert_eq!(stream_text(&doc, &contents[1]), "q Q");
    let label = stream_text(&doc, &contents[2]);
    assert!(label.starts_with("Q\n"));
    assert!(label.contains("([1]) Tj"));

    let fonts = first
        .get(b"Resources")
        .unwrap()
        .as_dict()
        .unwrap()
        .get(b"Font")
        .unwrap()
        .as_dict()
        .unwrap();
    assert!(fonts.has(b"FPgNum"));

    // Skipped page keeps its original content
    let second = doc.get_dictionary(ids[1]).unwrap();
    assert!(second.get(b"Contents").unwrap().as_reference().is_ok());

    let third = doc.get_dictionary(ids[2]).unwrap();
    let contents = third.get(b"Contents").unwrap().as_array().unwrap();
    assert!(stream_text(&doc, &contents[2]).contains("([3]) Tj"));
}

#[test]
fn test_stamp_rejects_mismatched_plan() {
    let mut doc = create_test_pdf(3);
    let options = PageNumberOptions::default();
    let plan = PageNumberingPlan::new(4, &options);

    assert!(matches!(
        stamp_page_numbers(&mut doc, &plan, &options),
        Err(OrganizeError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_number_pages_async() {
    let doc = create_test_pdf(4);
    let options = PageNumberOptions {
        exclude: [1].into_iter().collect(),
        ..Default::default()
    };

    let (_, stamped) = number_pages(doc, &options).await.unwrap();
    assert_eq!(stamped, 3);
}

#[tokio::test]
async fn test_organize_save_and_reload() {
    use tempfile::NamedTempFile;

    let source = create_test_pdf(3);
    let mut editor = PageSequenceEditor::load(3).unwrap();
    editor.move_to(0, 2).unwrap();
    let organized = organize(&source, editor.finalize().unwrap()).await.unwrap();

    let temp = NamedTempFile::new().unwrap();
    save_pdf(organized, temp.path()).await.unwrap();

    let loaded = load_pdf(temp.path()).await.unwrap();
    assert_eq!(page_widths(&loaded), vec![101, 102, 100]);
}

#[tokio::test]
async fn test_load_missing_file() {
    let result = load_pdf("/nonexistent/input.pdf").await;
    assert!(matches!(result, Err(OrganizeError::Io(_))));
}
