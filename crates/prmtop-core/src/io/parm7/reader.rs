use super::AMBER_CHARGE_SCALE;
use super::error::Parm7Error;
use super::format::{
    self, FormatSpec, append_floats, append_floats_with, append_ints, append_ints_with,
    append_strings,
};
use super::section::Section;
use crate::io::traits::TopologyFile;
use crate::model::{
    Angle, Bond, BoxDimensions, Dihedral, DihedralFlags, NO_INDEX, Pointers, SolventPointers,
    Topology,
};
use std::io::BufRead;

/// Reader for the Amber parm7/prmtop topology format.
///
/// The format is a stream of `%FLAG <NAME>` / `%FORMAT(...)` directive pairs,
/// each followed by fixed-column-width data lines. Decoding is a single
/// synchronous pass: the whole stream is consumed, the bonded raw lists are
/// regrouped, and the result is validated against the `POINTERS` header
/// before a [`Topology`] is returned.
pub struct Parm7File;

impl TopologyFile for Parm7File {
    type Output = Topology;
    type Error = Parm7Error;

    fn read_from(reader: &mut impl BufRead) -> Result<Topology, Parm7Error> {
        let mut decoder = Decoder::default();
        let mut lines = reader.lines();

        while let Some(line) = lines.next() {
            let line = line?;
            if let Some(name) = line.strip_prefix("%FLAG") {
                let format_line = lines.next().transpose()?.ok_or(Parm7Error::Truncated {
                    context: "a %FORMAT directive must follow %FLAG",
                })?;
                decoder.begin_section(name.trim(), &format_line)?;
            } else if line.starts_with("%VERSION") {
                decoder.topo.version = line.trim().to_string();
            } else {
                decoder.data_line(&line)?;
            }
        }

        decoder.finish()
    }
}

/// Decoder state threaded across successive lines: the current section, its
/// active format, the unresolved header values, and the raw buffers whose
/// final shape is only known after the stream ends.
#[derive(Default)]
struct Decoder {
    topo: Topology,
    section: Section,
    format: Option<FormatSpec>,
    pointers_ready: bool,
    pointer_values: Vec<i32>,
    bonds_h_raw: Vec<i32>,
    bonds_raw: Vec<i32>,
    angles_h_raw: Vec<i32>,
    angles_raw: Vec<i32>,
    dihedrals_h_raw: Vec<i32>,
    dihedrals_raw: Vec<i32>,
    hbond_cut_raw: Vec<f64>,
    solvent_raw: Vec<i32>,
    box_raw: Vec<f64>,
}

impl Decoder {
    fn begin_section(&mut self, name: &str, format_line: &str) -> Result<(), Parm7Error> {
        // Leaving POINTERS is the resolution point: from here on every
        // section's expected length is known and decoding is capped.
        if self.section == Section::Pointers && !self.pointers_ready {
            self.resolve_header()?;
        }
        self.section = Section::from_flag_name(name);
        self.format = Some(format::parse_format_line(format_line)?);
        Ok(())
    }

    fn resolve_header(&mut self) -> Result<(), Parm7Error> {
        self.topo.pointers = resolve_pointers(&self.pointer_values)?;
        self.topo.reserve_from_pointers();
        self.pointers_ready = true;
        Ok(())
    }

    /// Expected-length cap for a section, available only once the header has
    /// been resolved. Sections decoded before resolution buffer uncapped.
    fn cap(&self, expected: usize) -> Option<usize> {
        self.pointers_ready.then_some(expected)
    }

    fn natom(&self) -> usize {
        self.topo.pointers.natom as usize
    }

    fn data_line(&mut self, line: &str) -> Result<(), Parm7Error> {
        if matches!(self.section, Section::None | Section::Unknown) {
            return Ok(());
        }
        let Some(spec) = self.format else {
            return Ok(());
        };
        let ptr = &self.topo.pointers;

        match self.section {
            Section::Title => self.topo.title.push_str(line),
            Section::Pointers => {
                append_ints(line, &spec, &mut self.pointer_values, None, "POINTERS")?;
            }
            Section::AtomName => {
                let cap = self.cap(self.natom());
                append_strings(line, &spec, &mut self.topo.atom_name, cap);
            }
            Section::Charge => {
                let cap = self.cap(self.natom());
                append_floats_with(line, &spec, &mut self.topo.charge, cap, "CHARGE", |value| {
                    value / AMBER_CHARGE_SCALE
                })?;
            }
            Section::AtomicNumber => {
                let cap = self.cap(self.natom());
                append_ints(
                    line,
                    &spec,
                    &mut self.topo.atomic_number,
                    cap,
                    "ATOMIC_NUMBER",
                )?;
            }
            Section::Mass => {
                let cap = self.cap(self.natom());
                append_floats(line, &spec, &mut self.topo.mass, cap, "MASS")?;
            }
            Section::AtomTypeIndex => {
                let cap = self.cap(self.natom());
                append_ints_with(
                    line,
                    &spec,
                    &mut self.topo.atom_type_index,
                    cap,
                    "ATOM_TYPE_INDEX",
                    |value| value - 1,
                )?;
            }
            Section::NumberExcludedAtoms => {
                let cap = self.cap(self.natom());
                append_ints(
                    line,
                    &spec,
                    &mut self.topo.number_excluded_atoms,
                    cap,
                    "NUMBER_EXCLUDED_ATOMS",
                )?;
            }
            Section::ExcludedAtomsList => {
                let cap = self.cap(ptr.nnb as usize);
                append_ints_with(
                    line,
                    &spec,
                    &mut self.topo.excluded_atoms_list,
                    cap,
                    "EXCLUDED_ATOMS_LIST",
                    rebase_or_absent,
                )?;
            }
            Section::NonbondedParmIndex => {
                let cap = self.cap(ptr.nonbonded_index_count());
                append_ints_with(
                    line,
                    &spec,
                    &mut self.topo.nonbonded_parm_index,
                    cap,
                    "NONBONDED_PARM_INDEX",
                    rebase_or_absent,
                )?;
            }
            Section::ResidueLabel => {
                let cap = self.cap(ptr.nres as usize);
                append_strings(line, &spec, &mut self.topo.residue_label, cap);
            }
            Section::ResiduePointer => {
                let cap = self.cap(ptr.nres as usize);
                append_ints_with(
                    line,
                    &spec,
                    &mut self.topo.residue_pointer,
                    cap,
                    "RESIDUE_POINTER",
                    |value| value - 1,
                )?;
            }
            Section::BondForceConstant => {
                let cap = self.cap(ptr.numbnd as usize);
                append_floats(
                    line,
                    &spec,
                    &mut self.topo.bond_force_constant,
                    cap,
                    "BOND_FORCE_CONSTANT",
                )?;
            }
            Section::BondEquilValue => {
                let cap = self.cap(ptr.numbnd as usize);
                append_floats(
                    line,
                    &spec,
                    &mut self.topo.bond_equil_value,
                    cap,
                    "BOND_EQUIL_VALUE",
                )?;
            }
            Section::AngleForceConstant => {
                let cap = self.cap(ptr.numang as usize);
                append_floats(
                    line,
                    &spec,
                    &mut self.topo.angle_force_constant,
                    cap,
                    "ANGLE_FORCE_CONSTANT",
                )?;
            }
            Section::AngleEquilValue => {
                let cap = self.cap(ptr.numang as usize);
                append_floats(
                    line,
                    &spec,
                    &mut self.topo.angle_equil_value,
                    cap,
                    "ANGLE_EQUIL_VALUE",
                )?;
            }
            Section::DihedralForceConstant => {
                let cap = self.cap(ptr.nptra as usize);
                append_floats(
                    line,
                    &spec,
                    &mut self.topo.dihedral_force_constant,
                    cap,
                    "DIHEDRAL_FORCE_CONSTANT",
                )?;
            }
            Section::DihedralPeriodicity => {
                let cap = self.cap(ptr.nptra as usize);
                append_floats(
                    line,
                    &spec,
                    &mut self.topo.dihedral_periodicity,
                    cap,
                    "DIHEDRAL_PERIODICITY",
                )?;
            }
            Section::DihedralPhase => {
                let cap = self.cap(ptr.nptra as usize);
                append_floats(
                    line,
                    &spec,
                    &mut self.topo.dihedral_phase,
                    cap,
                    "DIHEDRAL_PHASE",
                )?;
            }
            Section::SceeScaleFactor => {
                let cap = self.cap(ptr.nptra as usize);
                append_floats(
                    line,
                    &spec,
                    &mut self.topo.scee_scale_factor,
                    cap,
                    "SCEE_SCALE_FACTOR",
                )?;
            }
            Section::ScnbScaleFactor => {
                let cap = self.cap(ptr.nptra as usize);
                append_floats(
                    line,
                    &spec,
                    &mut self.topo.scnb_scale_factor,
                    cap,
                    "SCNB_SCALE_FACTOR",
                )?;
            }
            Section::Solty => {
                let cap = self.cap(ptr.natyp as usize);
                append_floats(line, &spec, &mut self.topo.solty, cap, "SOLTY")?;
            }
            Section::LennardJonesAcoef => {
                let cap = self.cap(ptr.lennard_jones_count());
                append_floats(
                    line,
                    &spec,
                    &mut self.topo.lennard_jones_acoeff,
                    cap,
                    "LENNARD_JONES_ACOEF",
                )?;
            }
            Section::LennardJonesBcoef => {
                let cap = self.cap(ptr.lennard_jones_count());
                append_floats(
                    line,
                    &spec,
                    &mut self.topo.lennard_jones_bcoeff,
                    cap,
                    "LENNARD_JONES_BCOEF",
                )?;
            }
            Section::BondsIncHydrogen => {
                let cap = self.cap(ptr.nbonh as usize * 3);
                append_ints(line, &spec, &mut self.bonds_h_raw, cap, "BONDS_INC_HYDROGEN")?;
            }
            Section::BondsWithoutHydrogen => {
                let cap = self.cap(ptr.nbona as usize * 3);
                append_ints(
                    line,
                    &spec,
                    &mut self.bonds_raw,
                    cap,
                    "BONDS_WITHOUT_HYDROGEN",
                )?;
            }
            Section::AnglesIncHydrogen => {
                let cap = self.cap(ptr.ntheth as usize * 4);
                append_ints(
                    line,
                    &spec,
                    &mut self.angles_h_raw,
                    cap,
                    "ANGLES_INC_HYDROGEN",
                )?;
            }
            Section::AnglesWithoutHydrogen => {
                let cap = self.cap(ptr.ntheta as usize * 4);
                append_ints(
                    line,
                    &spec,
                    &mut self.angles_raw,
                    cap,
                    "ANGLES_WITHOUT_HYDROGEN",
                )?;
            }
            Section::DihedralsIncHydrogen => {
                let cap = self.cap(ptr.nphih as usize * 5);
                append_ints(
                    line,
                    &spec,
                    &mut self.dihedrals_h_raw,
                    cap,
                    "DIHEDRALS_INC_HYDROGEN",
                )?;
            }
            Section::DihedralsWithoutHydrogen => {
                let cap = self.cap(ptr.nphia as usize * 5);
                append_ints(
                    line,
                    &spec,
                    &mut self.dihedrals_raw,
                    cap,
                    "DIHEDRALS_WITHOUT_HYDROGEN",
                )?;
            }
            Section::HbondAcoef => {
                let cap = self.cap(ptr.nphb as usize);
                append_floats(line, &spec, &mut self.topo.hbond_acoeff, cap, "HBOND_ACOEF")?;
            }
            Section::HbondBcoef => {
                let cap = self.cap(ptr.nphb as usize);
                append_floats(line, &spec, &mut self.topo.hbond_bcoeff, cap, "HBOND_BCOEF")?;
            }
            Section::HbondCut => {
                append_floats(line, &spec, &mut self.hbond_cut_raw, None, "HBCUT")?;
            }
            Section::AmberAtomType => {
                let cap = self.cap(self.natom());
                append_strings(line, &spec, &mut self.topo.amber_atom_type, cap);
            }
            Section::TreeChainClassification => {
                let cap = self.cap(self.natom());
                append_strings(line, &spec, &mut self.topo.tree_chain_classification, cap);
            }
            Section::JoinArray => {
                let cap = self.cap(self.natom());
                append_ints(line, &spec, &mut self.topo.join_array, cap, "JOIN_ARRAY")?;
            }
            Section::Irotat => {
                let cap = self.cap(self.natom());
                append_ints(line, &spec, &mut self.topo.irotat, cap, "IROTAT")?;
            }
            Section::SolventPointers => {
                append_ints(line, &spec, &mut self.solvent_raw, None, "SOLVENT_POINTERS")?;
            }
            Section::AtomsPerMolecule => {
                let cap = self.cap(ptr.nres as usize);
                append_ints(
                    line,
                    &spec,
                    &mut self.topo.atoms_per_molecule,
                    cap,
                    "ATOMS_PER_MOLECULE",
                )?;
            }
            Section::BoxDimensions => {
                append_floats(line, &spec, &mut self.box_raw, None, "BOX_DIMENSIONS")?;
            }
            Section::RadiusSet => {
                if self.topo.radius_set.is_empty() {
                    self.topo.radius_set = line.trim().to_string();
                }
            }
            Section::Radii => {
                let cap = self.cap(self.natom());
                append_floats(line, &spec, &mut self.topo.radii, cap, "RADII")?;
            }
            Section::Screen => {
                let cap = self.cap(self.natom());
                append_floats(line, &spec, &mut self.topo.screen, cap, "SCREEN")?;
            }
            Section::Ipol => {
                let mut raw = Vec::new();
                append_ints(line, &spec, &mut raw, None, "IPOL")?;
                if let Some(first) = raw.first() {
                    self.topo.ipol = Some(*first);
                }
            }
            Section::None | Section::Unknown => unreachable!(),
        }

        Ok(())
    }

    fn finish(mut self) -> Result<Topology, Parm7Error> {
        // POINTERS may have been the final section of the stream.
        if !self.pointers_ready {
            self.resolve_header()?;
        }

        self.topo.title = self.topo.title.trim().to_string();

        if !self.solvent_raw.is_empty() {
            if self.solvent_raw.len() < 3 {
                return Err(Parm7Error::SizeMismatch {
                    section: "SOLVENT_POINTERS",
                    actual: self.solvent_raw.len(),
                    expected: 3,
                });
            }
            self.topo.solvent_pointers = Some(SolventPointers {
                iptres: self.solvent_raw[0],
                nspm: self.solvent_raw[1],
                nspsol: self.solvent_raw[2],
            });
        }

        if !self.box_raw.is_empty() {
            if self.box_raw.len() < 4 {
                return Err(Parm7Error::SizeMismatch {
                    section: "BOX_DIMENSIONS",
                    actual: self.box_raw.len(),
                    expected: 4,
                });
            }
            self.topo.box_dimensions = Some(BoxDimensions {
                angle: self.box_raw[0],
                a: self.box_raw[1],
                b: self.box_raw[2],
                c: self.box_raw[3],
            });
        }

        decode_bonds(&self.bonds_h_raw, "BONDS_INC_HYDROGEN", &mut self.topo.bonds)?;
        decode_bonds(&self.bonds_raw, "BONDS_WITHOUT_HYDROGEN", &mut self.topo.bonds)?;
        decode_angles(&self.angles_h_raw, "ANGLES_INC_HYDROGEN", &mut self.topo.angles)?;
        decode_angles(&self.angles_raw, "ANGLES_WITHOUT_HYDROGEN", &mut self.topo.angles)?;
        decode_dihedrals(
            &self.dihedrals_h_raw,
            "DIHEDRALS_INC_HYDROGEN",
            &mut self.topo.dihedrals,
        )?;
        decode_dihedrals(
            &self.dihedrals_raw,
            "DIHEDRALS_WITHOUT_HYDROGEN",
            &mut self.topo.dihedrals,
        )?;

        self.topo.hbond_cut = self.hbond_cut_raw.first().copied();

        validate(&self.topo)?;
        Ok(self.topo)
    }
}

/// Rebasing transform for sections where a raw `0` means "no entry" rather
/// than "index 0": zero maps to the sentinel, everything else shifts to
/// 0-based.
fn rebase_or_absent(value: i32) -> i32 {
    if value == 0 { NO_INDEX } else { value - 1 }
}

fn resolve_pointers(values: &[i32]) -> Result<Pointers, Parm7Error> {
    if values.len() < Pointers::REQUIRED {
        return Err(Parm7Error::SizeMismatch {
            section: "POINTERS",
            actual: values.len(),
            expected: Pointers::REQUIRED,
        });
    }

    // Counts are non-negative by contract; a negative raw value must not be
    // allowed to wrap into a huge expectation.
    let count = |idx: usize| -> Result<u32, Parm7Error> {
        u32::try_from(values[idx]).map_err(|_| Parm7Error::InvalidInt {
            section: "POINTERS",
            value: values[idx].to_string(),
        })
    };

    Ok(Pointers {
        natom: count(0)?,
        ntypes: count(1)?,
        nbonh: count(2)?,
        mbona: count(3)?,
        ntheth: count(4)?,
        mtheta: count(5)?,
        nphih: count(6)?,
        mphia: count(7)?,
        nhparm: count(8)?,
        nparm: count(9)?,
        nnb: count(10)?,
        nres: count(11)?,
        nbona: count(12)?,
        ntheta: count(13)?,
        nphia: count(14)?,
        numbnd: count(15)?,
        numang: count(16)?,
        nptra: count(17)?,
        natyp: count(18)?,
        nphb: count(19)?,
        ifpert: count(20)?,
        nbper: count(21)?,
        ngper: count(22)?,
        ndper: count(23)?,
        mbper: count(24)?,
        mgper: count(25)?,
        mdper: count(26)?,
        ifbox: count(27)?,
        nmxrs: count(28)?,
        ifcap: count(29)?,
        numextra: count(30)?,
        ncopy: if values.len() > Pointers::REQUIRED {
            Some(count(31)?)
        } else {
            None
        },
    })
}

// Bonded sections store coordinate-array offsets: each atom occupies three
// consecutive slots, so atom indices are recovered by dividing by 3. Type
// indices are 1-based in the raw stream.

fn decode_bonds(raw: &[i32], section: &'static str, out: &mut Vec<Bond>) -> Result<(), Parm7Error> {
    if raw.len() % 3 != 0 {
        return Err(Parm7Error::MalformedBondedGroup {
            section,
            len: raw.len(),
            group: 3,
        });
    }
    for group in raw.chunks_exact(3) {
        out.push(Bond {
            atom_i: group[0] / 3,
            atom_j: group[1] / 3,
            type_index: group[2] - 1,
        });
    }
    Ok(())
}

fn decode_angles(
    raw: &[i32],
    section: &'static str,
    out: &mut Vec<Angle>,
) -> Result<(), Parm7Error> {
    if raw.len() % 4 != 0 {
        return Err(Parm7Error::MalformedBondedGroup {
            section,
            len: raw.len(),
            group: 4,
        });
    }
    for group in raw.chunks_exact(4) {
        out.push(Angle {
            atom_i: group[0] / 3,
            atom_j: group[1] / 3,
            atom_k: group[2] / 3,
            type_index: group[3] - 1,
        });
    }
    Ok(())
}

fn decode_dihedrals(
    raw: &[i32],
    section: &'static str,
    out: &mut Vec<Dihedral>,
) -> Result<(), Parm7Error> {
    if raw.len() % 5 != 0 {
        return Err(Parm7Error::MalformedBondedGroup {
            section,
            len: raw.len(),
            group: 5,
        });
    }
    for group in raw.chunks_exact(5) {
        // The signs of the third and fourth offsets are flags, not magnitude:
        // negative third means the 1-4 interaction is suppressed, negative
        // fourth marks an improper term.
        let flags = DihedralFlags::new(group[2] < 0, group[3] < 0);
        out.push(Dihedral {
            atom_i: group[0] / 3,
            atom_j: group[1] / 3,
            atom_k: group[2].abs() / 3,
            atom_l: group[3].abs() / 3,
            type_index: group[4] - 1,
            flags,
        });
    }
    Ok(())
}

fn require_size(
    section: &'static str,
    actual: usize,
    expected: usize,
) -> Result<(), Parm7Error> {
    if actual != expected {
        return Err(Parm7Error::SizeMismatch {
            section,
            actual,
            expected,
        });
    }
    Ok(())
}

fn validate(topo: &Topology) -> Result<(), Parm7Error> {
    let ptr = &topo.pointers;
    let natom = ptr.natom as usize;
    let nres = ptr.nres as usize;
    let numbnd = ptr.numbnd as usize;
    let numang = ptr.numang as usize;
    let nptra = ptr.nptra as usize;

    require_size("ATOM_NAME", topo.atom_name.len(), natom)?;
    require_size("CHARGE", topo.charge.len(), natom)?;
    require_size("ATOMIC_NUMBER", topo.atomic_number.len(), natom)?;
    require_size("MASS", topo.mass.len(), natom)?;
    require_size("ATOM_TYPE_INDEX", topo.atom_type_index.len(), natom)?;
    require_size(
        "NUMBER_EXCLUDED_ATOMS",
        topo.number_excluded_atoms.len(),
        natom,
    )?;
    require_size(
        "EXCLUDED_ATOMS_LIST",
        topo.excluded_atoms_list.len(),
        ptr.nnb as usize,
    )?;
    require_size(
        "NONBONDED_PARM_INDEX",
        topo.nonbonded_parm_index.len(),
        ptr.nonbonded_index_count(),
    )?;
    require_size("RESIDUE_LABEL", topo.residue_label.len(), nres)?;
    require_size("RESIDUE_POINTER", topo.residue_pointer.len(), nres)?;

    require_size("BOND_FORCE_CONSTANT", topo.bond_force_constant.len(), numbnd)?;
    require_size("BOND_EQUIL_VALUE", topo.bond_equil_value.len(), numbnd)?;
    require_size(
        "ANGLE_FORCE_CONSTANT",
        topo.angle_force_constant.len(),
        numang,
    )?;
    require_size("ANGLE_EQUIL_VALUE", topo.angle_equil_value.len(), numang)?;
    require_size(
        "DIHEDRAL_FORCE_CONSTANT",
        topo.dihedral_force_constant.len(),
        nptra,
    )?;
    require_size(
        "DIHEDRAL_PERIODICITY",
        topo.dihedral_periodicity.len(),
        nptra,
    )?;
    require_size("DIHEDRAL_PHASE", topo.dihedral_phase.len(), nptra)?;
    require_size("SCEE_SCALE_FACTOR", topo.scee_scale_factor.len(), nptra)?;
    require_size("SCNB_SCALE_FACTOR", topo.scnb_scale_factor.len(), nptra)?;
    require_size("SOLTY", topo.solty.len(), ptr.natyp as usize)?;

    let lj_count = ptr.lennard_jones_count();
    require_size("LENNARD_JONES_ACOEF", topo.lennard_jones_acoeff.len(), lj_count)?;
    require_size("LENNARD_JONES_BCOEF", topo.lennard_jones_bcoeff.len(), lj_count)?;

    require_size("BONDS", topo.bonds.len(), ptr.bond_count())?;
    require_size("ANGLES", topo.angles.len(), ptr.angle_count())?;
    require_size("DIHEDRALS", topo.dihedrals.len(), ptr.dihedral_count())?;

    if ptr.nphb > 0 {
        require_size("HBOND_ACOEF", topo.hbond_acoeff.len(), ptr.nphb as usize)?;
        require_size("HBOND_BCOEF", topo.hbond_bcoeff.len(), ptr.nphb as usize)?;
        if topo.hbond_cut.is_none() {
            return Err(Parm7Error::MissingSection {
                section: "HBCUT",
                reason: "NPHB > 0",
            });
        }
    }

    require_size("AMBER_ATOM_TYPE", topo.amber_atom_type.len(), natom)?;
    require_size(
        "TREE_CHAIN_CLASSIFICATION",
        topo.tree_chain_classification.len(),
        natom,
    )?;
    require_size("JOIN_ARRAY", topo.join_array.len(), natom)?;
    require_size("IROTAT", topo.irotat.len(), natom)?;

    if ptr.ifbox > 0 && topo.box_dimensions.is_none() {
        return Err(Parm7Error::MissingSection {
            section: "BOX_DIMENSIONS",
            reason: "IFBOX > 0",
        });
    }

    require_size("RADII", topo.radii.len(), natom)?;
    require_size("SCREEN", topo.screen.len(), natom)?;

    if !topo.atoms_per_molecule.is_empty() {
        require_size("ATOMS_PER_MOLECULE", topo.atoms_per_molecule.len(), nres)?;
    }

    Ok(())
}
