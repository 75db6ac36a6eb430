pub const SCHEMA: &str = r#"
-- articles table
CREATE TABLE IF NOT EXISTS articles (
    id BIGSERIAL PRIMARY KEY,
    url TEXT NOT NULL,
    summary TEXT NOT NULL,
    query TEXT NOT NULL,
    tags TEXT[] NOT NULL DEFAULT '{}',
    retrieval_timestamp TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- dedup on url; the conflict target for insert-or-ignore
CREATE UNIQUE INDEX IF NOT EXISTS idx_articles_url ON articles(url);

-- set-membership search on tags
CREATE INDEX IF NOT EXISTS idx_articles_tags ON articles USING GIN (tags);
"#;
