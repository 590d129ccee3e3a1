use crate::common::{emission_order, NamedToken};
use std::collections::HashSet;
use tokn_core::{resolve_alias, AliasValue, ReferenceIndex, ResolveError, TokenEntry};

/// A token with its rendered alias-format value.
struct Rendered<'a> {
    named: NamedToken<'a>,
    value: AliasValue,
}

pub struct ScssSerializer<'b> {
    banner: &'b str,
    lines: Vec<String>,
}

impl<'b> ScssSerializer<'b> {
    pub fn new(banner: &'b str) -> Self {
        Self {
            banner,
            lines: Vec::new(),
        }
    }

    pub fn serialize(
        mut self,
        title: &str,
        tokens: &[&TokenEntry],
        index: &ReferenceIndex<'_>,
        generated_at: &str,
    ) -> Result<String, ResolveError> {
        let mut bases = Vec::new();
        let mut aliases = Vec::new();
        for named in emission_order(tokens) {
            let value = resolve_alias(named.token, index)?;
            let rendered = Rendered { named, value };
            if rendered.value.is_alias() {
                aliases.push(rendered);
            } else {
                bases.push(rendered);
            }
        }

        self.lines
            .push(format!("// {} - {} (SCSS)", self.banner, title));
        self.lines.push(format!("// Generated on {}", generated_at));
        self.lines.push(String::new());

        self.write_group(&bases);
        if !aliases.is_empty() {
            self.lines.push(String::new());
            self.write_group(&defer_forward_aliases(aliases));
        }

        self.lines.push(String::new());
        Ok(self.lines.join("\n"))
    }

    fn write_group(&mut self, group: &[Rendered<'_>]) {
        let mut current_section: Option<&str> = None;
        for rendered in group {
            let section = rendered.named.section();
            if current_section != Some(section) {
                current_section = Some(section);
                self.lines.push(format!("// {}", section));
            }
            self.lines.push(format!(
                "{}: {};",
                rendered.named.names.alias_variable(),
                rendered.value
            ));
        }
    }
}

/// Keep sorted order, except that an alias pointing at a later alias of the same group waits
/// until its target has been written. Cycles cannot be ordered; they keep sorted order.
fn defer_forward_aliases(mut pending: Vec<Rendered<'_>>) -> Vec<Rendered<'_>> {
    let in_group: HashSet<String> = pending
        .iter()
        .map(|r| r.named.names.alias_variable())
        .collect();
    let mut written: HashSet<String> = HashSet::new();
    let mut ordered = Vec::with_capacity(pending.len());

    while !pending.is_empty() {
        let ready = pending.iter().position(|r| {
            let target = r.value.as_str();
            !in_group.contains(target) || written.contains(target)
        });
        match ready {
            Some(pos) => {
                let next = pending.remove(pos);
                written.insert(next.named.names.alias_variable());
                ordered.push(next);
            }
            None => ordered.append(&mut pending),
        }
    }
    ordered
}
