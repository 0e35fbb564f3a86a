use prmtop::forcefield::{build_atom_residue_map, lj_pair_coeffs, lj_pair_index};
use prmtop::model::Topology;

/// Prints the human-readable topology report: header counts, totals, box and
/// solvent bookkeeping, then per-atom force-field details for the first
/// `sample_count` atoms.
pub fn print_summary(topo: &Topology, sample_count: usize) {
    let total_mass: f64 = topo.mass.iter().sum();
    let total_charge: f64 = topo.charge.iter().sum();

    println!(
        "Title: {}",
        if topo.title.is_empty() {
            "<none>"
        } else {
            &topo.title
        }
    );
    if !topo.version.is_empty() {
        println!("Version: {}", topo.version);
    }
    println!("Atoms: {}", topo.pointers.natom);
    println!("Residues: {}", topo.pointers.nres);
    println!("LJ types: {}", topo.pointers.ntypes);
    println!(
        "Bonds: {} (with H: {}, without H: {})",
        topo.bonds.len(),
        topo.pointers.nbonh,
        topo.pointers.nbona
    );
    println!(
        "Angles: {} (with H: {}, without H: {})",
        topo.angles.len(),
        topo.pointers.ntheth,
        topo.pointers.ntheta
    );
    println!(
        "Dihedrals: {} (with H: {}, without H: {})",
        topo.dihedrals.len(),
        topo.pointers.nphih,
        topo.pointers.nphia
    );
    println!("Excluded pairs: {}", topo.pointers.nnb);
    println!("Extra points: {}", topo.pointers.numextra);
    println!("Total mass (amu): {total_mass:.6}");
    println!("Total charge (e): {total_charge:.6}");

    match &topo.box_dimensions {
        Some(boxdim) => println!(
            "Box: IFBOX={}, angle={:.6}, a={:.6}, b={:.6}, c={:.6}",
            topo.pointers.ifbox, boxdim.angle, boxdim.a, boxdim.b, boxdim.c
        ),
        None => println!("Box: IFBOX={}, none", topo.pointers.ifbox),
    }

    if let Some(solvent) = &topo.solvent_pointers {
        println!(
            "Solvent pointers: IPTRES={}, NSPM={}, NSPSOL={}",
            solvent.iptres, solvent.nspm, solvent.nspsol
        );
    }

    if !topo.radius_set.is_empty() {
        println!("Radii set: {}", topo.radius_set);
    }

    if sample_count > 0 {
        print_atom_samples(topo, sample_count);
    }
}

fn print_atom_samples(topo: &Topology, sample_count: usize) {
    let sample_count = sample_count.min(topo.atom_name.len());
    let atom_to_res = build_atom_residue_map(topo);

    println!("Sample atoms (first {sample_count}):");
    for atom in 0..sample_count {
        let res = atom_to_res[atom];
        let (res_label, res_index) = match usize::try_from(res) {
            Ok(res) if res < topo.residue_label.len() => {
                (topo.residue_label[res].as_str(), res + 1)
            }
            _ => ("<none>", 0),
        };

        let lj_type = topo.atom_type_index[atom];

        println!(
            "Atom {:>6} {:<4} res {:<4} {}",
            atom + 1,
            topo.atom_name[atom],
            res_label,
            res_index
        );
        println!(
            "  Z={} mass={:.6} charge={:.6} amber_type={}",
            topo.atomic_number[atom], topo.mass[atom], topo.charge[atom], topo.amber_atom_type[atom]
        );

        if lj_type < 0 {
            println!("  LJ type=NA");
        } else {
            match (
                lj_pair_index(topo, lj_type, lj_type),
                lj_pair_coeffs(topo, lj_type, lj_type),
            ) {
                (Some(idx), Some((acoeff, bcoeff))) => println!(
                    "  LJ type={} index={} A={:.6} B={:.6}",
                    lj_type + 1,
                    idx + 1,
                    acoeff,
                    bcoeff
                ),
                _ => println!("  LJ type={} index=NA", lj_type + 1),
            }
        }
    }
}
