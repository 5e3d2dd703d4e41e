use ccle_db::processing::{derive_gene_lookup, MutationReader};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

const EFFECTS: [&str; 5] = ["missense", "intronic", "nonsense", "silent", "frameshift"];

fn generate_extract(rows: usize) -> String {
    let mut content = String::from(
        "model_id,gene_symbol,ensembl_gene_id,model_name,cdna_mutation,protein_mutation,type,effect,vaf,data_type,source\n",
    );
    for i in 0..rows {
        content.push_str(&format!(
            "SIDM{:05},GENE{},ENSG{:011},MODEL{},c.{}A>G,p.K{}E,substitution,{},{:.3},WES,Sanger\n",
            i % 1000,
            i % 5000,
            i % 5000,
            i % 1000,
            i,
            i % 700,
            EFFECTS[i % EFFECTS.len()],
            (i % 100) as f64 / 100.0
        ));
    }
    content
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation_filter");

    for rows in [1_000usize, 10_000, 100_000].iter() {
        let content = generate_extract(*rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &content, |b, content| {
            b.iter(|| {
                let filtered = MutationReader::new().read(content.as_bytes()).unwrap();
                black_box(derive_gene_lookup(&filtered.records));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
