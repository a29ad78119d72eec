use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Index,
    Records,
}

impl View {
    pub fn template_name(self) -> &'static str {
        match self {
            View::Index => "index.html",
            View::Records => "records.html",
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            View::Index => INDEX_HTML,
            View::Records => RECORDS_HTML,
        }
    }
}

/// Renders a page, preferring `{template_dir}/{name}` (re-read on every call)
/// over the built-in markup. `{{ v }}` is the cache-busting version.
pub async fn render_view(view: View, version: i64, template_dir: &Path) -> std::io::Result<String> {
    let path = template_dir.join(view.template_name());
    let template = match fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => view.builtin().to_string(),
        Err(err) => return Err(err),
    };
    Ok(fill(&template, version))
}

fn fill(template: &str, version: i64) -> String {
    let version = version.to_string();
    template
        .replace("{{STYLE}}", SHARED_STYLE)
        .replace("{{ v }}", &version)
        .replace("{{v}}", &version)
}

const SHARED_STYLE: &str = r#"
    :root {
      --bg: #f6f3ee;
      --ink: #2b2a28;
      --muted: #8b857d;
      --accent: #3f8f5f;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(43, 42, 40, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "PingFang SC", "Noto Sans SC", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      display: grid;
      gap: 20px;
    }

    nav {
      display: flex;
      gap: 16px;
    }

    nav a {
      color: var(--accent);
      font-weight: 600;
      text-decoration: none;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 22px;
      display: grid;
      gap: 10px;
    }

    .card h2 {
      margin: 0;
      font-size: 1.1rem;
    }

    textarea,
    input {
      width: 100%;
      font: inherit;
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid rgba(43, 42, 40, 0.15);
    }

    textarea {
      min-height: 90px;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    ul {
      margin: 0;
      padding-left: 20px;
    }

    .row {
      display: flex;
      gap: 10px;
      align-items: center;
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }
"#;

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>每日记录</title>
  <style>{{STYLE}}</style>
  <link rel="stylesheet" href="/static/style.css?v={{ v }}" />
</head>
<body>
  <main class="app">
    <nav>
      <a href="/">今天</a>
      <a href="/records">历史记录</a>
    </nav>

    <section class="card">
      <div class="row">
        <h2>📅 <span id="date"></span></h2>
        <a id="export" href="#">导出</a>
      </div>
      <label>🏷️ 关键词 (逗号分隔)<input id="keywords" /></label>
    </section>

    <section class="card">
      <h2>✅ 今天做了什么</h2>
      <textarea id="today_done"></textarea>
    </section>

    <section class="card">
      <h2>📋 明天打算做 (每行一项)</h2>
      <textarea id="tomorrow_plan"></textarea>
    </section>

    <section class="card">
      <h2>💭 感悟</h2>
      <textarea id="insights"></textarea>
    </section>

    <section class="card">
      <h2>☑️ 待办</h2>
      <div class="row"><input id="todo-input" /><button id="todo-add" type="button">添加</button></div>
      <ul id="todos"></ul>
    </section>

    <section class="card">
      <h2>⏱️ 专注记录</h2>
      <div class="row">
        <input id="focus-task" placeholder="任务" />
        <input id="focus-duration" type="number" min="1" value="25" />
        <button id="focus-add" type="button">记录</button>
      </div>
      <ul id="sessions"></ul>
    </section>

    <div class="row">
      <button id="save" type="button">保存</button>
      <span class="status" id="status"></span>
    </div>
  </main>

  <script>
    const today = new Date().toLocaleDateString('sv-SE');
    const $ = (id) => document.getElementById(id);
    let record = null;

    const setStatus = (text) => {
      $('status').textContent = text;
    };

    const renderLists = () => {
      $('todos').innerHTML = '';
      record.todos.forEach((todo, index) => {
        const li = document.createElement('li');
        const box = document.createElement('input');
        box.type = 'checkbox';
        box.checked = Boolean(todo.done);
        box.style.width = 'auto';
        box.addEventListener('change', () => {
          record.todos[index] = { ...todo, done: box.checked };
        });
        li.append(box, ' ', todo.text ?? String(todo));
        $('todos').append(li);
      });

      $('sessions').innerHTML = '';
      record.focus_sessions.forEach((session) => {
        const li = document.createElement('li');
        li.textContent = `${session.duration ?? 0}分钟 - ${session.task ?? '任务'}`;
        $('sessions').append(li);
      });
    };

    const load = async () => {
      const res = await fetch(`/api/record/${today}`);
      if (!res.ok) {
        throw new Error(await res.text());
      }
      record = await res.json();
      $('date').textContent = record.date || today;
      $('export').href = `/api/export/${today}`;
      $('keywords').value = (record.keywords || []).join(', ');
      $('today_done').value = record.today_done || '';
      $('tomorrow_plan').value = (record.tomorrow_plan || []).join('\n');
      $('insights').value = record.insights || '';
      record.todos = record.todos || [];
      record.focus_sessions = record.focus_sessions || [];
      renderLists();
    };

    const save = async () => {
      record.date = today;
      record.keywords = $('keywords').value.split(',').map((s) => s.trim()).filter(Boolean);
      record.today_done = $('today_done').value;
      record.tomorrow_plan = $('tomorrow_plan').value.split('\n').map((s) => s.trim()).filter(Boolean);
      record.insights = $('insights').value;
      setStatus('保存中...');
      const res = await fetch(`/api/record/${today}`, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(record)
      });
      if (!res.ok) {
        throw new Error(await res.text());
      }
      setStatus('已保存');
    };

    $('todo-add').addEventListener('click', () => {
      const text = $('todo-input').value.trim();
      if (!text) return;
      record.todos.push({ text, done: false });
      $('todo-input').value = '';
      renderLists();
    });

    $('focus-add').addEventListener('click', () => {
      const duration = Number($('focus-duration').value) || 0;
      const task = $('focus-task').value.trim() || '任务';
      record.focus_sessions.push({ duration, task, finished_at: new Date().toISOString() });
      renderLists();
      save().catch((err) => setStatus(err.message));
    });

    $('save').addEventListener('click', () => save().catch((err) => setStatus(err.message)));

    load().catch((err) => setStatus(err.message));
  </script>
  <script src="/static/app.js?v={{ v }}" defer></script>
</body>
</html>
"##;

const RECORDS_HTML: &str = r##"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>历史记录</title>
  <style>{{STYLE}}
    .heatmap {
      display: grid;
      grid-template-rows: repeat(7, 14px);
      grid-auto-flow: column;
      grid-auto-columns: 14px;
      gap: 3px;
      overflow-x: auto;
    }

    .cell {
      border-radius: 3px;
      background: #e6e1d8;
      cursor: pointer;
    }

    .cell.on {
      background: var(--accent);
    }

    pre {
      white-space: pre-wrap;
      margin: 0;
      font: inherit;
    }
  </style>
  <link rel="stylesheet" href="/static/style.css?v={{ v }}" />
</head>
<body>
  <main class="app">
    <nav>
      <a href="/">今天</a>
      <a href="/records">历史记录</a>
    </nav>

    <section class="card">
      <h2>🔥 打卡热图 <span class="status" id="total"></span></h2>
      <div class="heatmap" id="heatmap"></div>
    </section>

    <section class="card">
      <div class="row">
        <input id="pick" type="date" style="width:auto" />
        <a id="export" href="#">导出</a>
      </div>
      <pre id="detail" class="status">点击热图中的日期查看记录</pre>
    </section>
  </main>

  <script>
    const $ = (id) => document.getElementById(id);
    const DAYS = 7 * 26;

    const showRecord = async (date) => {
      $('pick').value = date;
      $('export').href = `/api/export/${date}`;
      const res = await fetch(`/api/export/${date}`);
      $('detail').textContent = await res.text();
    };

    const loadHeatmap = async () => {
      const res = await fetch('/api/heatmap');
      const counts = res.ok ? await res.json() : {};
      $('total').textContent = `共 ${Object.keys(counts).length} 天`;

      const start = new Date();
      start.setDate(start.getDate() - DAYS + 1);
      for (let i = 0; i < DAYS; i += 1) {
        const day = new Date(start);
        day.setDate(start.getDate() + i);
        const key = day.toLocaleDateString('sv-SE');
        const cell = document.createElement('div');
        cell.className = counts[key] ? 'cell on' : 'cell';
        cell.title = key;
        cell.addEventListener('click', () => showRecord(key));
        $('heatmap').append(cell);
      }
    };

    $('pick').addEventListener('change', () => {
      if ($('pick').value) showRecord($('pick').value);
    });

    loadHeatmap();
  </script>
  <script src="/static/records.js?v={{ v }}" defer></script>
</body>
</html>
"##;
