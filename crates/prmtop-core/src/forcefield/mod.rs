//! Read-only force-field parameter lookups over a decoded [`Topology`].
//!
//! Lennard-Jones parameters are stored the Amber way: a square
//! `ntypes x ntypes` index matrix whose entries point into triangular
//! coefficient tables of `ntypes * (ntypes + 1) / 2` unique pair values.
//! The functions here resolve that indirection and the residue membership
//! implied by the residue start pointers; they never mutate the topology.

use crate::model::{NO_INDEX, Topology};

/// Builds the atom-to-residue membership map.
///
/// Each residue covers the atom range from its start pointer up to the next
/// residue's start pointer (the final residue extends to the atom count);
/// ranges are clamped to the valid atom index space. Atoms outside every
/// range keep the `NO_INDEX` sentinel.
pub fn build_atom_residue_map(topo: &Topology) -> Vec<i32> {
    let natom = topo.pointers.natom as i32;
    let mut atom_to_res = vec![NO_INDEX; natom as usize];
    if topo.residue_pointer.is_empty() {
        return atom_to_res;
    }

    let nres = topo.pointers.nres as usize;
    for res in 0..nres {
        let start = topo.residue_pointer[res].clamp(0, natom);
        let end = if res + 1 < nres {
            topo.residue_pointer[res + 1]
        } else {
            natom
        }
        .clamp(start, natom);

        for atom in start..end {
            atom_to_res[atom as usize] = res as i32;
        }
    }

    atom_to_res
}

/// Resolves a Lennard-Jones type pair to its triangular-table index.
///
/// Returns `None` when either type falls outside `[0, ntypes)` or the index
/// matrix marks the pair as absent.
pub fn lj_pair_index(topo: &Topology, type_i: i32, type_j: i32) -> Option<usize> {
    if type_i < 0 || type_j < 0 {
        return None;
    }
    let ntypes = topo.pointers.ntypes as i32;
    if type_i >= ntypes || type_j >= ntypes {
        return None;
    }

    let idx = type_i as usize * ntypes as usize + type_j as usize;
    let param_index = *topo.nonbonded_parm_index.get(idx)?;
    if param_index < 0 {
        return None;
    }

    Some(param_index as usize)
}

/// Resolves a Lennard-Jones type pair to its `(A, B)` coefficients.
///
/// Returns `None` when the pair has no index or the index escapes the
/// coefficient tables.
pub fn lj_pair_coeffs(topo: &Topology, type_i: i32, type_j: i32) -> Option<(f64, f64)> {
    let idx = lj_pair_index(topo, type_i, type_j)?;
    let acoeff = *topo.lennard_jones_acoeff.get(idx)?;
    let bcoeff = *topo.lennard_jones_bcoeff.get(idx)?;
    Some((acoeff, bcoeff))
}
