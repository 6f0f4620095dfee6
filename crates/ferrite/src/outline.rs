//! Structure view of the items of a file.

use ferrite_yellow::ast::{self, AstNode as _, Visitor};
use text_size::TextRange;

pub(crate) struct Entry {
    pub(crate) depth: usize,
    pub(crate) keyword: &'static str,
    pub(crate) name: String,
    pub(crate) range: TextRange,
}

pub(crate) fn outline(file: ast::SourceFile<'_>) -> Vec<Entry> {
    let mut collector = Outline::default();
    for item in file.items() {
        item.accept(&mut collector);
    }
    collector.entries
}

#[derive(Default)]
struct Outline {
    entries: Vec<Entry>,
    depth: usize,
}

impl Outline {
    fn push(&mut self, keyword: &'static str, item: ast::Item<'_>, name: String) {
        let range = item.syntax().trimmed_range();
        self.entries.push(Entry { depth: self.depth, keyword, name, range });
    }
}

impl<'a> Visitor<'a> for Outline {
    fn visit_fn_item(&mut self, node: ast::FnItem<'a>) {
        let mut signature = name_of(node.name());
        if let Some(params) = node.param_list() {
            signature.push_str(params.syntax().text_trimmed());
        }
        if let Some(ret) = node.ret_type() {
            signature.push(' ');
            signature.push_str(ret.syntax().text_trimmed());
        }
        self.push("fn", node.into(), signature);
    }

    fn visit_struct_item(&mut self, node: ast::StructItem<'a>) {
        self.push("struct", node.into(), name_of(node.name()));
        self.depth += 1;
        for field in node.field_list().into_iter().flat_map(|list| list.fields()) {
            let ty = field.ty().map_or("?", |ty| ty.syntax().text_trimmed());
            self.entries.push(Entry {
                depth: self.depth,
                keyword: "field",
                name: format!("{}: {ty}", name_of(field.name())),
                range: field.syntax().trimmed_range(),
            });
        }
        self.depth -= 1;
    }

    fn visit_const_item(&mut self, node: ast::ConstItem<'a>) {
        self.push("const", node.into(), name_of(node.name()));
    }

    fn visit_use_item(&mut self, node: ast::UseItem<'a>) {
        let path = node.path().map_or("?", |path| path.syntax().text_trimmed());
        self.push("use", node.into(), path.to_owned());
    }

    fn visit_mod_item(&mut self, node: ast::ModItem<'a>) {
        self.push("mod", node.into(), name_of(node.name()));
        let Some(list) = node.item_list() else { return };

        self.depth += 1;
        for item in list.items() {
            item.accept(self);
        }
        self.depth -= 1;
    }
}

fn name_of(name: Option<ast::Name<'_>>) -> String {
    name.map_or_else(|| "?".to_owned(), |name| name.text().to_owned())
}

#[cfg(test)]
mod tests {
    use super::outline;

    fn render(text: &str) -> Vec<String> {
        let parse = ferrite_parse::parse(text);
        outline(parse.source_file())
            .into_iter()
            .map(|entry| format!("{}{} {}", "  ".repeat(entry.depth), entry.keyword, entry.name))
            .collect()
    }

    #[test]
    fn nested_items() {
        let entries = render(
            "use std::fmt;
pub fn add(a: i32, b: i32) -> i32 { a + b }
struct Point { x: i32, y: &T }
mod m {
    const N: usize = 1;
    mod inner;
}
",
        );

        assert_eq!(
            entries,
            [
                "use std::fmt",
                "fn add(a: i32, b: i32) -> i32",
                "struct Point",
                "  field x: i32",
                "  field y: &T",
                "mod m",
                "  const N",
                "  mod inner",
            ]
        );
    }

    #[test]
    fn missing_names() {
        assert_eq!(render("fn (x: u8) {}\nstruct { a }"), ["fn ?(x: u8)", "struct ?", "  field a: ?"]);
    }
}
