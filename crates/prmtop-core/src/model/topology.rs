use super::pointers::Pointers;
use serde::Serialize;

/// Sentinel stored where the format encodes "no entry" as a raw `0`
/// (excluded-atom list, non-bonded parameter index matrix).
pub const NO_INDEX: i32 = -1;

/// One bond instance, with 0-based atom and type indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bond {
    pub atom_i: i32,
    pub atom_j: i32,
    pub type_index: i32,
}

/// One angle instance, with 0-based atom and type indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Angle {
    pub atom_i: i32,
    pub atom_j: i32,
    pub atom_k: i32,
    pub type_index: i32,
}

/// Per-term flags recovered from the signs of a dihedral's third and
/// fourth raw atom offsets, packed into a single byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DihedralFlags(u8);

impl DihedralFlags {
    /// The 1-4 non-bonded interaction for this term's end atoms is suppressed.
    pub const SUPPRESS_14: u8 = 0b01;
    /// This term is an improper dihedral.
    pub const IMPROPER: u8 = 0b10;

    pub fn new(suppress_14: bool, improper: bool) -> Self {
        let mut bits = 0;
        if suppress_14 {
            bits |= Self::SUPPRESS_14;
        }
        if improper {
            bits |= Self::IMPROPER;
        }
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn suppress_14(self) -> bool {
        self.0 & Self::SUPPRESS_14 != 0
    }

    pub fn improper(self) -> bool {
        self.0 & Self::IMPROPER != 0
    }
}

/// One dihedral instance, with 0-based atom and type indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dihedral {
    pub atom_i: i32,
    pub atom_j: i32,
    pub atom_k: i32,
    pub atom_l: i32,
    pub type_index: i32,
    pub flags: DihedralFlags,
}

/// Solvent bookkeeping from the `SOLVENT_POINTERS` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolventPointers {
    /// IPTRES: final residue that is part of the solute.
    pub iptres: i32,
    /// NSPM: total number of molecules.
    pub nspm: i32,
    /// NSPSOL: first solvent molecule.
    pub nspsol: i32,
}

/// Periodic box geometry from the `BOX_DIMENSIONS` section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxDimensions {
    /// Box angle in degrees; 109.47 for a truncated octahedron.
    pub angle: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// The fully decoded, validated topology aggregate.
///
/// All index-valued fields are 0-based; `NO_INDEX` marks entries the format
/// encodes as absent. Per-atom vectors all have length `pointers.natom`,
/// per-residue vectors `pointers.nres`, and so on — the decoder refuses to
/// return a topology for which any of these invariants fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Topology {
    pub version: String,
    pub title: String,
    pub pointers: Pointers,

    pub atom_name: Vec<String>,
    /// Partial charges in elementary-charge units (raw values are divided
    /// by the Amber internal charge scale during decoding).
    pub charge: Vec<f64>,
    pub atomic_number: Vec<i32>,
    pub mass: Vec<f64>,
    pub atom_type_index: Vec<i32>,
    pub number_excluded_atoms: Vec<i32>,
    pub excluded_atoms_list: Vec<i32>,
    pub nonbonded_parm_index: Vec<i32>,
    pub residue_label: Vec<String>,
    pub residue_pointer: Vec<i32>,

    pub bond_force_constant: Vec<f64>,
    pub bond_equil_value: Vec<f64>,
    pub angle_force_constant: Vec<f64>,
    pub angle_equil_value: Vec<f64>,
    pub dihedral_force_constant: Vec<f64>,
    pub dihedral_periodicity: Vec<f64>,
    pub dihedral_phase: Vec<f64>,
    pub scee_scale_factor: Vec<f64>,
    pub scnb_scale_factor: Vec<f64>,
    pub solty: Vec<f64>,
    pub lennard_jones_acoeff: Vec<f64>,
    pub lennard_jones_bcoeff: Vec<f64>,

    pub bonds: Vec<Bond>,
    pub angles: Vec<Angle>,
    pub dihedrals: Vec<Dihedral>,

    pub hbond_acoeff: Vec<f64>,
    pub hbond_bcoeff: Vec<f64>,
    pub hbond_cut: Option<f64>,

    pub amber_atom_type: Vec<String>,
    pub tree_chain_classification: Vec<String>,
    pub join_array: Vec<i32>,
    pub irotat: Vec<i32>,

    pub solvent_pointers: Option<SolventPointers>,
    pub atoms_per_molecule: Vec<i32>,
    pub box_dimensions: Option<BoxDimensions>,

    pub radius_set: String,
    pub radii: Vec<f64>,
    pub screen: Vec<f64>,
    pub ipol: Option<i32>,
}

impl Topology {
    /// Pre-sizes every buffer from the resolved header counts so the bulk
    /// of decoding appends without reallocation.
    pub(crate) fn reserve_from_pointers(&mut self) {
        let natom = self.pointers.natom as usize;
        let nnb = self.pointers.nnb as usize;
        let nres = self.pointers.nres as usize;
        let numbnd = self.pointers.numbnd as usize;
        let numang = self.pointers.numang as usize;
        let nptra = self.pointers.nptra as usize;
        let natyp = self.pointers.natyp as usize;
        let nphb = self.pointers.nphb as usize;

        self.atom_name.reserve(natom);
        self.charge.reserve(natom);
        self.atomic_number.reserve(natom);
        self.mass.reserve(natom);
        self.atom_type_index.reserve(natom);
        self.number_excluded_atoms.reserve(natom);
        self.excluded_atoms_list.reserve(nnb);
        self.nonbonded_parm_index
            .reserve(self.pointers.nonbonded_index_count());
        self.residue_label.reserve(nres);
        self.residue_pointer.reserve(nres);

        self.bond_force_constant.reserve(numbnd);
        self.bond_equil_value.reserve(numbnd);
        self.angle_force_constant.reserve(numang);
        self.angle_equil_value.reserve(numang);
        self.dihedral_force_constant.reserve(nptra);
        self.dihedral_periodicity.reserve(nptra);
        self.dihedral_phase.reserve(nptra);
        self.scee_scale_factor.reserve(nptra);
        self.scnb_scale_factor.reserve(nptra);
        self.solty.reserve(natyp);

        let lj_count = self.pointers.lennard_jones_count();
        self.lennard_jones_acoeff.reserve(lj_count);
        self.lennard_jones_bcoeff.reserve(lj_count);

        self.bonds.reserve(self.pointers.bond_count());
        self.angles.reserve(self.pointers.angle_count());
        self.dihedrals.reserve(self.pointers.dihedral_count());

        self.hbond_acoeff.reserve(nphb);
        self.hbond_bcoeff.reserve(nphb);

        self.amber_atom_type.reserve(natom);
        self.tree_chain_classification.reserve(natom);
        self.join_array.reserve(natom);
        self.irotat.reserve(natom);

        self.atoms_per_molecule.reserve(nres);
        self.radii.reserve(natom);
        self.screen.reserve(natom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dihedral_flags_pack_both_bits_independently() {
        assert_eq!(DihedralFlags::new(false, false).bits(), 0);
        assert_eq!(
            DihedralFlags::new(true, false).bits(),
            DihedralFlags::SUPPRESS_14
        );
        assert_eq!(
            DihedralFlags::new(false, true).bits(),
            DihedralFlags::IMPROPER
        );
        assert_eq!(DihedralFlags::new(true, true).bits(), 0b11);
    }

    #[test]
    fn dihedral_flags_accessors_reflect_packed_bits() {
        let flags = DihedralFlags::new(true, false);
        assert!(flags.suppress_14());
        assert!(!flags.improper());

        let flags = DihedralFlags::new(false, true);
        assert!(!flags.suppress_14());
        assert!(flags.improper());
    }

    #[test]
    fn reserve_from_pointers_leaves_lengths_untouched() {
        let mut topo = Topology {
            pointers: Pointers {
                natom: 100,
                ntypes: 4,
                nres: 10,
                ..Pointers::default()
            },
            ..Topology::default()
        };
        topo.reserve_from_pointers();

        assert!(topo.atom_name.is_empty());
        assert!(topo.atom_name.capacity() >= 100);
        assert!(topo.nonbonded_parm_index.capacity() >= 16);
        assert!(topo.lennard_jones_acoeff.capacity() >= 10);
    }
}
