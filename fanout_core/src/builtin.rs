//! Built-in candidate lists for categories that do not need registry data.

pub const BRANCHES: &[&str] = &[
    // main-line
    "main", "master", "develop", "staging", "production", "trunk",
    "release", "stable", "nightly", "canary",
    // features
    "feature-auth", "feature-login", "feature-api", "feature-ui",
    "feature-dashboard", "feature-search", "feature-payments",
    "feature-notifications", "feature-onboarding", "feature-settings",
    "feature-profile", "feature-admin", "feature-reports", "feature-export",
    "feature-import", "feature-webhook", "feature-oauth", "feature-2fa",
    "feature-dark-mode", "feature-mobile", "feature-redesign",
    "feature-caching", "feature-pagination", "feature-filtering",
    "feature-sorting", "feature-bulk-actions", "feature-csv-export",
    // fixes
    "fix-typo", "fix-crash", "fix-memory-leak", "fix-timeout",
    "fix-auth", "fix-login", "fix-null-pointer", "fix-race-condition",
    "fix-sql-injection", "fix-xss", "fix-csp", "fix-cors",
    "fix-pagination", "fix-encoding", "fix-timezone", "fix-locale",
    "fix-scroll", "fix-overflow", "fix-layout", "fix-z-index",
    // hotfix
    "hotfix-security", "hotfix-deploy", "hotfix-prod", "hotfix-critical",
    "hotfix-regression", "hotfix-data-loss", "hotfix-outage",
    // release
    "release-1.0", "release-1.1", "release-2.0", "release-2.3",
    "release-3.0", "release-0.9", "release-4.2", "release-1.0.1",
    // chore / refactor / ci
    "refactor-db", "refactor-auth", "refactor-api", "refactor-models",
    "chore-deps", "chore-lint", "chore-format", "chore-types",
    "ci-pipeline", "ci-docker", "ci-cache", "ci-deploy",
    "test-coverage", "test-e2e", "test-unit", "test-integration",
    "docs-api", "docs-setup", "docs-readme",
    // user-prefixed
    "alice/feature-login", "bob/fix-crash", "dev/experiment",
    "user/wip", "alice/refactor", "bob/hotfix",
];

pub const USERNAMES: &[&str] = &[
    "alice", "bob", "charlie", "dave", "eve", "frank", "grace",
    "henry", "iris", "jack", "kate", "leo", "mia", "noah",
    "dev", "admin", "deploy", "user", "root", "ubuntu",
    "ec2-user", "jenkins", "ci", "github-actions", "runner",
    "webapp", "api", "worker", "scheduler", "monitor",
];

pub const HOSTS: &[&str] = &[
    "localhost", "server01", "server02", "server03",
    "prod-web-1", "prod-web-2", "prod-db-1",
    "staging.example.com", "dev.example.com",
    "db.internal", "api.example.com", "api.internal",
    "192.168.1.100", "192.168.1.101", "10.0.0.5", "10.0.0.10",
    "172.16.0.1", "my-server.cloud", "node-1.cluster.local",
    "node-2.cluster.local", "bastion.example.com",
    "jump.internal", "vpn.example.com",
];

pub const PORTS: &[&str] = &[
    "80", "443", "3000", "3001", "3306", "4000", "4200",
    "5000", "5001", "5173", "5432", "6379", "6380",
    "8000", "8080", "8081", "8443", "8888", "9000",
    "9090", "9200", "9300", "27017", "27018",
];

pub const FILE_PATHS: &[&str] = &[
    // python
    "src/main.py", "src/app.py", "src/server.py", "src/cli.py",
    "app/models.py", "app/views.py", "app/controllers.py",
    "app/routes.py", "app/utils.py", "app/helpers.py",
    "config/settings.py", "config/database.py", "config/logging.py",
    "tests/test_main.py", "tests/test_api.py", "tests/test_models.py",
    "tests/conftest.py", "migrations/001_initial.py",
    // rust
    "src/main.rs", "src/lib.rs", "src/server.rs", "src/cli.rs",
    "src/handlers.rs", "src/models.rs", "src/db.rs", "src/error.rs",
    "src/config.rs", "src/auth.rs",
    // typescript / js
    "src/index.ts", "src/app.ts", "src/server.ts",
    "src/routes/index.ts", "src/controllers/auth.ts",
    "src/models/user.ts", "src/utils/helpers.ts",
    "components/Header.tsx", "components/Footer.tsx",
    "components/Button.tsx", "components/Modal.tsx",
    "pages/index.tsx", "pages/about.tsx", "pages/login.tsx",
    "styles/global.css", "styles/app.scss",
    // go
    "pkg/server/handler.go", "internal/auth/jwt.go",
    "cmd/main.go", "internal/db/postgres.go",
    // config
    "config/config.yaml", "config/app.toml", ".env",
    "docker-compose.yml", "Dockerfile", "Makefile",
    "package.json", "Cargo.toml", "pyproject.toml",
    // docs
    "docs/README.md", "README.md", "CHANGELOG.md",
];

pub const DIR_PATHS: &[&str] = &[
    "projects/new-app", "projects/my-service", "projects/api",
    "src/components", "src/modules", "src/utils",
    "backend/api", "backend/services", "backend/workers",
    "frontend/build", "frontend/dist", "frontend/src",
    "deploy/scripts", "deploy/k8s", "deploy/terraform",
    "tmp/cache", "tmp/uploads", "tmp/exports",
    "var/log/app", "var/log/nginx", "var/run/app",
    "opt/services", "opt/apps", "opt/myapp",
    "home/user/docs", "home/user/projects", "home/user/workspace",
    "workspace/experiment", "workspace/prototype",
    "data/output", "data/input", "data/raw", "data/processed",
    "models/checkpoints", "models/weights", "models/cache",
    "logs/app", "logs/access", "logs/error",
];

pub const GENERIC_DIRS: &[&str] = &[
    "mydir", "newdir", "testdir", "tmpdir", "builddir", "outdir",
    "src", "lib", "bin", "dist", "build", "output", "cache",
    "uploads", "downloads", "backup", "archive", "logs", "tmp",
    "workspace", "project", "app", "service", "module",
];

pub const SCRIPT_NAMES: &[&str] = &[
    "app.py", "server.py", "main.py", "script.py", "run.py",
    "manage.py", "cli.py", "worker.py", "train.py", "test.py",
    "setup.py", "build.py", "deploy.py", "migrate.py", "seed.py",
    "app.js", "server.js", "index.js", "main.js", "worker.js",
    "app.ts", "server.ts", "index.ts", "main.ts",
    "main.rs", "lib.rs", "server.rs",
    "main.go", "server.go", "handler.go",
];

pub const SSH_KEYS: &[&str] = &[
    "id_rsa", "id_ed25519", "id_ecdsa", "id_dsa",
    "deploy_key", "github_key", "work_key",
];

pub const SERVICES: &[&str] = &[
    "nginx", "apache2", "httpd", "postgresql", "mysql", "mariadb",
    "redis", "mongodb", "elasticsearch", "rabbitmq",
    "docker", "containerd", "kubernetes",
    "sshd", "fail2ban", "ufw", "firewalld",
    "cron", "crond", "atd",
    "NetworkManager", "systemd-resolved", "avahi-daemon",
];

pub const SHELLS: &[&str] = &["bash", "zsh", "fish", "sh"];

pub const GIBBERISH: &[&str] = &[
    "asdfghjkl", "qwertyuiop", "zxcvbnm", "xyzzy", "qqq",
    "flibbertigibbet", "blorgzorp", "fnorble", "greeble", "slargh",
    "wumpus", "thingamajig", "doohickey", "whatchamacallit", "thingummy",
    "frobnicator", "blorpify", "quuxify", "nooble", "plonker",
    "splunge", "furtle", "snorble", "worble", "glorp",
];

pub const PROCESS_IDS: &[&str] = &[
    "1234", "2345", "3456", "4567", "5678", "6789", "7890", "8901", "9012",
    "10234", "11345", "12456", "13567", "14678", "15789", "16890", "17901",
    "99999", "88888", "77777", "66666", "55555",
];

pub const COMMIT_MESSAGES: &[&str] = &[
    "fix bug", "add feature", "update deps", "refactor code",
    "fix typo", "add tests", "update readme", "initial commit",
    "wip", "cleanup", "hotfix", "add logging", "fix crash",
    "improve performance", "add validation", "fix lint errors",
    "add docs", "bump version", "fix tests", "merge conflicts",
];

pub const IP_ADDRESSES: &[&str] = &[
    "192.168.1.1", "192.168.1.100", "192.168.0.1", "192.168.0.10",
    "10.0.0.1", "10.0.0.5", "10.0.0.10", "10.0.1.1",
    "172.16.0.1", "172.16.1.10", "127.0.0.1",
    "203.0.113.1", "198.51.100.2", "198.18.0.5",
];

/// Line numbers are `1..=100`; generated rather than spelled out.
pub fn line_numbers() -> Vec<String> {
    (1..=100).map(|n: u32| n.to_string()).collect()
}
