use criterion::{Criterion, criterion_group, criterion_main};
use quran_nerds_engine::markup::parse_blocks;
use quran_nerds_engine::normalize_markup;

const ARABIC: &str = "ٱللَّهُ لَآ إِلَٰهَ إِلَّا هُوَ ٱلْحَىُّ ٱلْقَيُّومُ";
const BANGLA: &str = "আল্লাহ, তিনি ছাড়া কোন ইলাহ নেই, তিনি চিরঞ্জীব";

/// A note with `citations` pasted verse citations separated by commentary.
fn generate_note(citations: usize) -> String {
    let mut note = String::from("<h2>Study notes</h2>\n");
    for i in 0..citations {
        note.push_str(&format!(
            "<p>Al-Baqara {}</p>\n<p>{ARABIC}</p>\n<p><strong>English:</strong> Allah - there is no deity except Him</p>\n<p>{BANGLA}</p>\n<p>Commentary on verse {} with <em>emphasis</em> and a <a href=\"https://quran.com/2/{}\">link</a>.</p>\n<ul><li>point one</li><li>point two</li></ul>\n",
            i + 1,
            i + 1,
            i + 1
        ));
    }
    note
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.sample_size(20);

    let pasted = generate_note(100);
    group.bench_function("parse_blocks", |b| {
        b.iter(|| {
            let blocks = parse_blocks(std::hint::black_box(&pasted));
            std::hint::black_box(blocks)
        });
    });

    group.bench_function("pasted_citations", |b| {
        b.iter(|| {
            let out = normalize_markup(std::hint::black_box(&pasted));
            std::hint::black_box(out)
        });
    });

    let normalized = normalize_markup(&pasted).into_markup();
    group.bench_function("already_normalized", |b| {
        b.iter(|| {
            let out = normalize_markup(std::hint::black_box(&normalized));
            std::hint::black_box(out)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
