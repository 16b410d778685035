use std::io::{Cursor, Read, Seek};

use zip::ZipArchive;

use super::error::ArchiveError;
use super::model::CurveKind;

/// Text of one selected archive member, or the member-scoped reason it
/// could not be read.
#[derive(Debug)]
pub struct MemberText {
    pub name: String,
    pub text: Result<String, ArchiveError>,
}

/// The COHP and COOP members found in one archive. `None` means the archive
/// has no member carrying that token.
#[derive(Debug, Default)]
pub struct ArchiveContents {
    pub cohp: Option<MemberText>,
    pub coop: Option<MemberText>,
}

impl ArchiveContents {
    pub fn get(&self, kind: CurveKind) -> Option<&MemberText> {
        match kind {
            CurveKind::Cohp => self.cohp.as_ref(),
            CurveKind::Coop => self.coop.as_ref(),
        }
    }
}

/// Locate the first `COHPCAR` and the first `COOPCAR` member of a zip
/// archive held in memory and decode them as UTF-8.
pub fn extract_members(bytes: &[u8]) -> Result<ArchiveContents, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(ArchiveError::Open)?;
    let names = member_names(&mut archive)?;

    let mut contents = ArchiveContents::default();
    for kind in CurveKind::ALL {
        let Some((index, name)) = names
            .iter()
            .enumerate()
            .find(|(_, name)| name.contains(kind.member_token()))
        else {
            log::info!("archive has no {} member", kind.member_token());
            continue;
        };
        let text = read_member(&mut archive, index, name);
        if let Err(e) = &text {
            log::warn!("{kind}: {e}");
        }
        let member = Some(MemberText {
            name: name.clone(),
            text,
        });
        match kind {
            CurveKind::Cohp => contents.cohp = member,
            CurveKind::Coop => contents.coop = member,
        }
    }
    Ok(contents)
}

/// Member names in archive order.
fn member_names<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>, ArchiveError> {
    (0..archive.len())
        .map(|i| {
            archive
                .by_index_raw(i)
                .map(|file| file.name().to_string())
                .map_err(ArchiveError::Open)
        })
        .collect()
}

fn read_member<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    name: &str,
) -> Result<String, ArchiveError> {
    let mut file = archive.by_index(index).map_err(|source| ArchiveError::Member {
        name: name.to_string(),
        source,
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|source| ArchiveError::Io {
        name: name.to_string(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| ArchiveError::Decode {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::FileOptions;

    use super::*;

    fn archive(members: &[(&str, &[u8])]) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in members {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(bytes).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn selects_members_by_token() {
        let bytes = archive(&[
            ("run/README", &b"notes"[..]),
            ("run/COOPCAR.lobster", &b"coop"[..]),
            ("run/COHPCAR.lobster", &b"cohp"[..]),
        ]);
        let contents = extract_members(&bytes).unwrap();
        let cohp = contents.get(CurveKind::Cohp).unwrap();
        assert_eq!(cohp.name, "run/COHPCAR.lobster");
        assert_eq!(cohp.text.as_deref().unwrap(), "cohp");
        assert_eq!(contents.coop.unwrap().text.unwrap(), "coop");
    }

    #[test]
    fn first_matching_member_wins() {
        let bytes = archive(&[
            ("a/COHPCAR.lobster", &b"first"[..]),
            ("b/COHPCAR.lobster", &b"second"[..]),
        ]);
        let contents = extract_members(&bytes).unwrap();
        assert_eq!(contents.cohp.unwrap().text.unwrap(), "first");
        assert!(contents.coop.is_none());
    }

    #[test]
    fn decode_failure_is_member_scoped() {
        let bytes = archive(&[
            ("COHPCAR.lobster", &[0xff_u8, 0xfe, 0x00][..]),
            ("COOPCAR.lobster", &b"ok"[..]),
        ]);
        let contents = extract_members(&bytes).unwrap();
        assert!(matches!(
            contents.cohp.unwrap().text,
            Err(ArchiveError::Decode { .. })
        ));
        assert_eq!(contents.coop.unwrap().text.unwrap(), "ok");
    }

    #[test]
    fn garbage_is_not_an_archive() {
        assert!(matches!(
            extract_members(b"definitely not a zip"),
            Err(ArchiveError::Open(_))
        ));
    }
}
