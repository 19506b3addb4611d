//! Benchmarks for the docmdx pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use docmdx::assembler::assemble;
use docmdx::parser::{extract_prose, parse_document_xml, StyleNames, TableInterpreter};
use docmdx::render::render_document;
use docmdx::types::{ColourMode, Document, Paragraph, Row, Schema, Table};
use docmdx::Converter;

fn table(rows: &[(&str, String)]) -> Table {
    Table {
        rows: rows.iter().map(|(h, v)| Row::new(*h, v.clone())).collect(),
    }
}

fn layers_cell(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                "Layer name: Layer {i}\nLayer id: layer-{i}\nstacCol: collection-{i}\n\
                 Colormap name: viridis\nLegend type: gradient\nLegend minimum: 0\n\
                 Legend maximum: {i}\nColor stops: [#440154, #21918C, rgb(253, 231, 37)]"
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn sample_document(layers: usize) -> Document {
    let mut paragraphs = vec![Paragraph::plain("Heading 1", "Introduction paragraph")];
    for i in 0..40 {
        paragraphs.push(Paragraph::plain("Normal", format!("Body line {i} of the introduction.")));
    }
    paragraphs.push(Paragraph::bold("License"));
    paragraphs.push(Paragraph::plain("Normal", "CC-BY 4.0"));

    Document {
        tables: vec![
            table(&[
                ("id", "bench".to_string()),
                ("name", "Benchmark Dataset".to_string()),
                ("description", "Synthetic dataset".to_string()),
                ("media", "Image: bench.png\nImage text (alt): Bench".to_string()),
                ("tags", "Topic: Climate\nSubtopic: Heat\nSource: NASA".to_string()),
                ("layers", layers_cell(layers)),
            ]),
            table(&[
                ("temporal_extent", "Start: 2000\nEnd: 2020".to_string()),
                ("temporal_resolution", "Value: Annual".to_string()),
            ]),
            table(&[]),
        ],
        paragraphs,
    }
}

fn document_xml(rows: usize) -> String {
    let mut xml = String::from("<w:document xmlns:w=\"w\"><w:body><w:tbl>");
    for i in 0..rows {
        xml.push_str(&format!(
            "<w:tr><w:tc><w:p><w:r><w:t>row{i}</w:t></w:r></w:p></w:tc>\
             <w:tc><w:p><w:r><w:t>Value: {i}</w:t></w:r></w:p></w:tc></w:tr>"
        ));
    }
    xml.push_str("</w:tbl>");
    for i in 0..rows {
        xml.push_str(&format!(
            "<w:p><w:pPr><w:pStyle w:val=\"Heading2\"/></w:pPr><w:r><w:t>Section {i}</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Body {i}</w:t></w:r></w:p>"
        ));
    }
    xml.push_str("</w:body></w:document>");
    xml
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    let styles = StyleNames::default();
    let xml = document_xml(200);

    group.bench_function("document_xml_200", |b| {
        b.iter(|| parse_document_xml(black_box(&xml), &styles).unwrap())
    });

    let document = sample_document(8);
    group.bench_function("interpret_tables", |b| {
        b.iter(|| TableInterpreter::interpret(black_box(&document)).unwrap())
    });
    group.bench_function("extract_prose", |b| {
        b.iter(|| extract_prose(black_box(&document.paragraphs)))
    });

    group.finish();
}

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");
    let schema = Schema::default();

    for layers in [1, 16] {
        let document = sample_document(layers);
        let tables = TableInterpreter::interpret(&document).unwrap();
        let prose = extract_prose(&document.paragraphs);

        group.bench_function(format!("assemble_{layers}_layers"), |b| {
            b.iter(|| assemble(black_box(&tables), &schema, ColourMode::Rgb).unwrap())
        });

        let record = assemble(&tables, &schema, ColourMode::Rgb).unwrap();
        group.bench_function(format!("render_{layers}_layers"), |b| {
            b.iter(|| render_document(black_box(&record), &tables, &prose, &schema).unwrap())
        });
    }

    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let converter = Converter::default();
    let document = sample_document(4);

    c.bench_function("convert_document", |b| {
        b.iter(|| converter.convert(black_box(&document)).unwrap())
    });
}

criterion_group!(benches, bench_parsing, bench_assembly, bench_convert);
criterion_main!(benches);
