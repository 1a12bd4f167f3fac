use crate::types::analysis::FileStat;

/// Parses `git diff --numstat` output. Binary entries (`-\t-\t<path>`) count as zero lines.
pub fn parse_numstat(output: &str) -> Vec<FileStat> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<FileStat> {
    let mut fields = line.splitn(3, '\t');
    let additions = fields.next()?;
    let deletions = fields.next()?;
    let path = fields.next()?.trim();
    if path.is_empty() {
        return None;
    }
    Some(FileStat::new(
        resolve_rename(path),
        additions.trim().parse().unwrap_or(0),
        deletions.trim().parse().unwrap_or(0),
    ))
}

/// Maps `old => new` and `dir/{old => new}/file` onto the destination path.
fn resolve_rename(path: &str) -> String {
    if let (Some(open), Some(close)) = (path.find('{'), path.rfind('}')) {
        if open < close {
            if let Some((_, new)) = path[open + 1..close].split_once(" => ") {
                let joined = format!("{}{}{}", &path[..open], new, &path[close + 1..]);
                return joined.replace("//", "/");
            }
        }
    }
    match path.split_once(" => ") {
        Some((_, new)) => new.to_string(),
        None => path.to_string(),
    }
}
