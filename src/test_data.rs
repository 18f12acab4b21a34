pub const POST_DATA: &str = "# Writing a tiny blog engine

How much machinery does a personal blog actually need?

After years of hauling a static-site toolchain around, the answer turned
out to be: a directory of markdown files and a naming convention.

- The file name carries the date and the slug
- The first heading is the title
- Everything else is the body

~~Databases~~ Files are enough.
";

pub const PAGE_DATA: &str = "# About

This blog is generated from a directory of markdown files.
";
