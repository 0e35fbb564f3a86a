use serde::Serialize;

/// The `POINTERS` header record of a parm7 topology.
///
/// Every other section's expected length is a pure function of these counts,
/// so the decoder cannot cap or validate anything until this record has been
/// resolved. The first 31 values are required and positionally meaningful;
/// `ncopy` is a later addition and may be absent from older files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pointers {
    /// NATOM: total number of atoms.
    pub natom: u32,
    /// NTYPES: total number of distinct Lennard-Jones atom types.
    pub ntypes: u32,
    /// NBONH: number of bonds containing hydrogen.
    pub nbonh: u32,
    /// MBONA: number of bonds not containing hydrogen.
    pub mbona: u32,
    /// NTHETH: number of angles containing hydrogen.
    pub ntheth: u32,
    /// MTHETA: number of angles not containing hydrogen.
    pub mtheta: u32,
    /// NPHIH: number of dihedrals containing hydrogen.
    pub nphih: u32,
    /// MPHIA: number of dihedrals not containing hydrogen.
    pub mphia: u32,
    /// NHPARM: currently unused by Amber.
    pub nhparm: u32,
    /// NPARM: currently unused by Amber.
    pub nparm: u32,
    /// NNB: total number of excluded-atom list entries.
    pub nnb: u32,
    /// NRES: number of residues.
    pub nres: u32,
    /// NBONA: MBONA plus constraint bonds.
    pub nbona: u32,
    /// NTHETA: MTHETA plus constraint angles.
    pub ntheta: u32,
    /// NPHIA: MPHIA plus constraint dihedrals.
    pub nphia: u32,
    /// NUMBND: number of unique bond types.
    pub numbnd: u32,
    /// NUMANG: number of unique angle types.
    pub numang: u32,
    /// NPTRA: number of unique dihedral types.
    pub nptra: u32,
    /// NATYP: number of atom types in the parameter file (SOLTY count).
    pub natyp: u32,
    /// NPHB: number of distinct 10-12 hydrogen-bond pair types.
    pub nphb: u32,
    /// IFPERT: perturbation flag (1 means perturbation info present).
    pub ifpert: u32,
    /// NBPER: number of bonds to be perturbed.
    pub nbper: u32,
    /// NGPER: number of angles to be perturbed.
    pub ngper: u32,
    /// NDPER: number of dihedrals to be perturbed.
    pub ndper: u32,
    /// MBPER: number of bonds with atoms entirely in the perturbed group.
    pub mbper: u32,
    /// MGPER: number of angles with atoms entirely in the perturbed group.
    pub mgper: u32,
    /// MDPER: number of dihedrals with atoms entirely in the perturbed group.
    pub mdper: u32,
    /// IFBOX: periodic box flag (0 none, 1 orthorhombic, 2 truncated octahedron, 3 triclinic).
    pub ifbox: u32,
    /// NMXRS: number of atoms in the largest residue.
    pub nmxrs: u32,
    /// IFCAP: CAP water-droplet option flag.
    pub ifcap: u32,
    /// NUMEXTRA: number of extra points (virtual sites).
    pub numextra: u32,
    /// NCOPY: number of copies for advanced simulations (optional 32nd value).
    pub ncopy: Option<u32>,
}

impl Pointers {
    /// Number of required values in the `POINTERS` section.
    pub const REQUIRED: usize = 31;

    /// Total bond instances across the with- and without-hydrogen lists.
    pub fn bond_count(&self) -> usize {
        self.nbonh as usize + self.nbona as usize
    }

    /// Total angle instances across the with- and without-hydrogen lists.
    pub fn angle_count(&self) -> usize {
        self.ntheth as usize + self.ntheta as usize
    }

    /// Total dihedral instances across the with- and without-hydrogen lists.
    pub fn dihedral_count(&self) -> usize {
        self.nphih as usize + self.nphia as usize
    }

    /// Side length squared of the non-bonded parameter index matrix.
    pub fn nonbonded_index_count(&self) -> usize {
        (self.ntypes as usize) * (self.ntypes as usize)
    }

    /// Length of the triangular Lennard-Jones coefficient tables.
    pub fn lennard_jones_count(&self) -> usize {
        let ntypes = self.ntypes as usize;
        ntypes * (ntypes + 1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_counts_follow_pointer_arithmetic() {
        let ptr = Pointers {
            ntypes: 15,
            nbonh: 10,
            nbona: 7,
            ntheth: 4,
            ntheta: 2,
            nphih: 9,
            nphia: 3,
            ..Pointers::default()
        };

        assert_eq!(ptr.bond_count(), 17);
        assert_eq!(ptr.angle_count(), 6);
        assert_eq!(ptr.dihedral_count(), 12);
        assert_eq!(ptr.nonbonded_index_count(), 225);
        assert_eq!(ptr.lennard_jones_count(), 120);
    }

    #[test]
    fn lennard_jones_count_is_zero_without_types() {
        assert_eq!(Pointers::default().lennard_jones_count(), 0);
        assert_eq!(Pointers::default().nonbonded_index_count(), 0);
    }
}
