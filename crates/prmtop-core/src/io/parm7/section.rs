use phf::{Map, phf_map};

/// The section a `%FLAG` directive switches the decoder into.
///
/// `None` is the state before any directive has been seen; `Unknown` covers
/// section names outside the closed table below, whose data lines are
/// skipped for forward compatibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    None,
    Unknown,
    Title,
    Pointers,
    AtomName,
    Charge,
    AtomicNumber,
    Mass,
    AtomTypeIndex,
    NumberExcludedAtoms,
    ExcludedAtomsList,
    NonbondedParmIndex,
    ResidueLabel,
    ResiduePointer,
    BondForceConstant,
    BondEquilValue,
    AngleForceConstant,
    AngleEquilValue,
    DihedralForceConstant,
    DihedralPeriodicity,
    DihedralPhase,
    SceeScaleFactor,
    ScnbScaleFactor,
    Solty,
    LennardJonesAcoef,
    LennardJonesBcoef,
    BondsIncHydrogen,
    BondsWithoutHydrogen,
    AnglesIncHydrogen,
    AnglesWithoutHydrogen,
    DihedralsIncHydrogen,
    DihedralsWithoutHydrogen,
    HbondAcoef,
    HbondBcoef,
    HbondCut,
    AmberAtomType,
    TreeChainClassification,
    JoinArray,
    Irotat,
    SolventPointers,
    AtomsPerMolecule,
    BoxDimensions,
    RadiusSet,
    Radii,
    Screen,
    Ipol,
}

static SECTION_NAMES: Map<&'static str, Section> = phf_map! {
    "TITLE" => Section::Title,
    "POINTERS" => Section::Pointers,
    "ATOM_NAME" => Section::AtomName,
    "CHARGE" => Section::Charge,
    "ATOMIC_NUMBER" => Section::AtomicNumber,
    "MASS" => Section::Mass,
    "ATOM_TYPE_INDEX" => Section::AtomTypeIndex,
    "NUMBER_EXCLUDED_ATOMS" => Section::NumberExcludedAtoms,
    "EXCLUDED_ATOMS_LIST" => Section::ExcludedAtomsList,
    "NONBONDED_PARM_INDEX" => Section::NonbondedParmIndex,
    "RESIDUE_LABEL" => Section::ResidueLabel,
    "RESIDUE_POINTER" => Section::ResiduePointer,
    "BOND_FORCE_CONSTANT" => Section::BondForceConstant,
    "BOND_EQUIL_VALUE" => Section::BondEquilValue,
    "ANGLE_FORCE_CONSTANT" => Section::AngleForceConstant,
    "ANGLE_EQUIL_VALUE" => Section::AngleEquilValue,
    "DIHEDRAL_FORCE_CONSTANT" => Section::DihedralForceConstant,
    "DIHEDRAL_PERIODICITY" => Section::DihedralPeriodicity,
    "DIHEDRAL_PHASE" => Section::DihedralPhase,
    "SCEE_SCALE_FACTOR" => Section::SceeScaleFactor,
    "SCNB_SCALE_FACTOR" => Section::ScnbScaleFactor,
    "SOLTY" => Section::Solty,
    "LENNARD_JONES_ACOEF" => Section::LennardJonesAcoef,
    "LENNARD_JONES_BCOEF" => Section::LennardJonesBcoef,
    "BONDS_INC_HYDROGEN" => Section::BondsIncHydrogen,
    "BONDS_WITHOUT_HYDROGEN" => Section::BondsWithoutHydrogen,
    "ANGLES_INC_HYDROGEN" => Section::AnglesIncHydrogen,
    "ANGLES_WITHOUT_HYDROGEN" => Section::AnglesWithoutHydrogen,
    "DIHEDRALS_INC_HYDROGEN" => Section::DihedralsIncHydrogen,
    "DIHEDRALS_WITHOUT_HYDROGEN" => Section::DihedralsWithoutHydrogen,
    "HBOND_ACOEF" => Section::HbondAcoef,
    "HBOND_BCOEF" => Section::HbondBcoef,
    "HBCUT" => Section::HbondCut,
    "AMBER_ATOM_TYPE" => Section::AmberAtomType,
    "TREE_CHAIN_CLASSIFICATION" => Section::TreeChainClassification,
    "JOIN_ARRAY" => Section::JoinArray,
    "IROTAT" => Section::Irotat,
    "SOLVENT_POINTERS" => Section::SolventPointers,
    "ATOMS_PER_MOLECULE" => Section::AtomsPerMolecule,
    "BOX_DIMENSIONS" => Section::BoxDimensions,
    "RADIUS_SET" => Section::RadiusSet,
    "RADII" => Section::Radii,
    "SCREEN" => Section::Screen,
    "IPOL" => Section::Ipol,
};

impl Section {
    /// Maps a trimmed `%FLAG` section name through the closed name table.
    pub fn from_flag_name(name: &str) -> Self {
        SECTION_NAMES.get(name).copied().unwrap_or(Section::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flag_name_resolves_known_sections() {
        assert_eq!(Section::from_flag_name("POINTERS"), Section::Pointers);
        assert_eq!(Section::from_flag_name("ATOM_NAME"), Section::AtomName);
        assert_eq!(Section::from_flag_name("HBCUT"), Section::HbondCut);
        assert_eq!(
            Section::from_flag_name("DIHEDRALS_WITHOUT_HYDROGEN"),
            Section::DihedralsWithoutHydrogen
        );
        assert_eq!(Section::from_flag_name("IPOL"), Section::Ipol);
    }

    #[test]
    fn from_flag_name_maps_unrecognized_names_to_unknown() {
        assert_eq!(Section::from_flag_name("CMAP_COUNT"), Section::Unknown);
        assert_eq!(Section::from_flag_name(""), Section::Unknown);
        assert_eq!(Section::from_flag_name("pointers"), Section::Unknown);
    }
}
