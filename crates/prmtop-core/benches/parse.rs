use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use prmtop::io::parm7::Parm7File;
use prmtop::io::traits::TopologyFile;
use std::io::Cursor;

fn push_ints(out: &mut String, name: &str, values: impl Iterator<Item = i32>) {
    out.push_str(&format!("%FLAG {name}\n%FORMAT(10I8)\n"));
    let mut on_line = 0;
    for value in values {
        out.push_str(&format!("{value:>8}"));
        on_line += 1;
        if on_line == 10 {
            out.push('\n');
            on_line = 0;
        }
    }
    if on_line > 0 {
        out.push('\n');
    }
}

fn push_floats(out: &mut String, name: &str, values: impl Iterator<Item = f64>) {
    out.push_str(&format!("%FLAG {name}\n%FORMAT(5E16.8)\n"));
    let mut on_line = 0;
    for value in values {
        out.push_str(&format!("{:>16}", format!("{value:.8E}")));
        on_line += 1;
        if on_line == 5 {
            out.push('\n');
            on_line = 0;
        }
    }
    if on_line > 0 {
        out.push('\n');
    }
}

fn push_strings(out: &mut String, name: &str, values: impl Iterator<Item = String>) {
    out.push_str(&format!("%FLAG {name}\n%FORMAT(20a4)\n"));
    let mut on_line = 0;
    for value in values {
        out.push_str(&format!("{value:<4}"));
        on_line += 1;
        if on_line == 20 {
            out.push('\n');
            on_line = 0;
        }
    }
    if on_line > 0 {
        out.push('\n');
    }
}

/// Generates a self-consistent parm7 text for a chain of `natom` atoms in
/// `natom / 10` residues, with one bond per adjacent atom pair.
fn synthetic_parm7(natom: usize) -> String {
    let nres = (natom / 10).max(1);
    let nbona = natom - 1;
    let ntypes = 4usize;

    let mut pointers = vec![0i32; 31];
    pointers[0] = natom as i32;
    pointers[1] = ntypes as i32;
    pointers[11] = nres as i32;
    pointers[12] = nbona as i32;
    pointers[15] = 1; // numbnd

    let mut out = String::from("%VERSION  VERSION_STAMP = V0001.000  DATE = 01/01/20  00:00:00\n");
    out.push_str("%FLAG TITLE\n%FORMAT(20a4)\nsynthetic chain\n");
    push_ints(&mut out, "POINTERS", pointers.iter().copied());

    push_strings(&mut out, "ATOM_NAME", (0..natom).map(|i| format!("C{}", i % 10)));
    push_floats(&mut out, "CHARGE", (0..natom).map(|i| (i % 7) as f64 - 3.0));
    push_ints(&mut out, "ATOMIC_NUMBER", (0..natom).map(|_| 6));
    push_floats(&mut out, "MASS", (0..natom).map(|_| 12.01));
    push_ints(
        &mut out,
        "ATOM_TYPE_INDEX",
        (0..natom).map(|i| (i % ntypes) as i32 + 1),
    );
    push_ints(&mut out, "NUMBER_EXCLUDED_ATOMS", (0..natom).map(|_| 0));
    push_ints(
        &mut out,
        "NONBONDED_PARM_INDEX",
        (0..ntypes * ntypes).map(|i| {
            let (row, col) = (i / ntypes, i % ntypes);
            let (lo, hi) = (row.min(col), row.max(col));
            (hi * (hi + 1) / 2 + lo) as i32 + 1
        }),
    );
    push_strings(&mut out, "RESIDUE_LABEL", (0..nres).map(|_| "RES".to_string()));
    push_ints(
        &mut out,
        "RESIDUE_POINTER",
        (0..nres).map(|r| (r * natom / nres) as i32 + 1),
    );
    push_floats(&mut out, "BOND_FORCE_CONSTANT", std::iter::once(300.0));
    push_floats(&mut out, "BOND_EQUIL_VALUE", std::iter::once(1.526));
    let lj_count = ntypes * (ntypes + 1) / 2;
    push_floats(&mut out, "LENNARD_JONES_ACOEF", (0..lj_count).map(|i| 1000.0 + i as f64));
    push_floats(&mut out, "LENNARD_JONES_BCOEF", (0..lj_count).map(|i| 20.0 + i as f64));
    push_ints(
        &mut out,
        "BONDS_WITHOUT_HYDROGEN",
        (0..nbona).flat_map(|i| [(i * 3) as i32, ((i + 1) * 3) as i32, 1]),
    );
    push_strings(&mut out, "AMBER_ATOM_TYPE", (0..natom).map(|_| "CT".to_string()));
    push_strings(
        &mut out,
        "TREE_CHAIN_CLASSIFICATION",
        (0..natom).map(|_| "M".to_string()),
    );
    push_ints(&mut out, "JOIN_ARRAY", (0..natom).map(|_| 0));
    push_ints(&mut out, "IROTAT", (0..natom).map(|_| 0));
    push_floats(&mut out, "RADII", (0..natom).map(|_| 1.7));
    push_floats(&mut out, "SCREEN", (0..natom).map(|_| 0.72));

    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_parm7");

    for natom in [100usize, 1000, 10000] {
        let text = synthetic_parm7(natom);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("atoms", natom), &text, |b, text| {
            b.iter(|| {
                let mut cursor = Cursor::new(black_box(text.as_bytes()));
                Parm7File::read_from(&mut cursor).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
