use crate::auth::USER_HEADER;

pub fn render_index() -> String {
    INDEX_HTML.replace("{{USER_HEADER}}", USER_HEADER)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Payday Budget</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #1f2a2e;
      --muted: #6b7478;
      --accent: #2d8f6f;
      --danger: #c8553d;
      --card: #ffffff;
      --line: #e3ded3;
    }

    body.dark {
      --bg: #141a1c;
      --ink: #e8ecea;
      --muted: #9aa4a6;
      --card: #1e2628;
      --line: #2d3739;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      display: grid;
      justify-items: center;
      padding: 24px 16px 48px;
    }

    .app {
      width: min(720px, 100%);
      display: grid;
      gap: 18px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    h1 {
      margin: 0;
      font-size: 1.6rem;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 16px;
      padding: 20px;
    }

    .hero {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
      text-align: center;
    }

    .hero strong {
      display: block;
      font-size: 1.8rem;
    }

    .label {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .bar {
      height: 10px;
      border-radius: 999px;
      background: var(--line);
      overflow: hidden;
      margin-top: 14px;
    }

    .bar span {
      display: block;
      height: 100%;
      background: var(--accent);
      transition: width 300ms ease;
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    input, select, button {
      font: inherit;
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid var(--line);
      background: var(--card);
      color: var(--ink);
    }

    button {
      cursor: pointer;
      background: var(--accent);
      border-color: var(--accent);
      color: #fff;
    }

    button.ghost {
      background: transparent;
      color: var(--ink);
    }

    button.danger {
      background: var(--danger);
      border-color: var(--danger);
    }

    ul {
      list-style: none;
      margin: 12px 0 0;
      padding: 0;
    }

    li {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 8px 0;
      border-bottom: 1px solid var(--line);
    }

    .income {
      color: var(--accent);
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status.error {
      color: var(--danger);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Payday Budget</h1>
      <div>
        <input id="user" placeholder="user id" size="14" />
        <button class="ghost" id="theme" type="button">Theme</button>
      </div>
    </header>

    <section class="card">
      <div class="hero">
        <div><span class="label">Per day</span><strong id="daily">-</strong></div>
        <div><span class="label">Days left</span><strong id="days">-</strong></div>
        <div><span class="label">Left</span><strong id="remaining">-</strong></div>
      </div>
      <div class="bar"><span id="used" style="width: 0%"></span></div>
      <p class="label" id="meta"></p>
    </section>

    <section class="card">
      <form id="spend-form">
        <input name="amount" type="number" min="0" step="any" placeholder="Amount" required />
        <input name="description" placeholder="Description" />
        <input name="category" placeholder="Category" />
        <label><input name="is_income" type="checkbox" /> Income</label>
        <button type="submit">Add</button>
      </form>
      <ul id="transactions"></ul>
    </section>

    <section class="card">
      <form id="fixed-form">
        <input name="name" placeholder="Fixed expense" required />
        <input name="monthly_amount" type="number" min="0" step="any" placeholder="Per month" required />
        <button type="submit">Add</button>
      </form>
      <ul id="fixed"></ul>
    </section>

    <section class="card">
      <form id="budget-form">
        <input name="initial_budget" type="number" min="0" step="any" placeholder="Budget" required />
        <input name="target_payday" type="number" min="1" max="31" placeholder="Payday" />
        <button type="submit">New period</button>
        <button class="danger" id="archive" type="button">Archive to savings</button>
      </form>
    </section>

    <p class="status" id="status"></p>
  </main>

  <script>
    const userInput = document.getElementById('user');
    const statusEl = document.getElementById('status');
    let overview = null;

    userInput.value = localStorage.getItem('user') || '';
    userInput.addEventListener('change', () => {
      localStorage.setItem('user', userInput.value.trim());
      refresh();
    });

    const setStatus = (message, tone) => {
      statusEl.textContent = message;
      statusEl.className = `status ${tone || ''}`;
    };

    const api = async (method, path, body) => {
      const res = await fetch(path, {
        method,
        headers: {
          'content-type': 'application/json',
          '{{USER_HEADER}}': userInput.value.trim()
        },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const money = (value) => Number(value).toLocaleString();

    const item = (text, onRemove, className) => {
      const li = document.createElement('li');
      const span = document.createElement('span');
      span.textContent = text;
      if (className) span.className = className;
      const button = document.createElement('button');
      button.className = 'ghost';
      button.type = 'button';
      button.textContent = 'Undo';
      button.addEventListener('click', () => onRemove().catch((err) => setStatus(err.message, 'error')));
      li.append(span, button);
      return li;
    };

    const render = () => {
      document.body.classList.toggle('dark', overview.theme === 'dark');
      document.getElementById('daily').textContent = money(overview.daily_limit);
      document.getElementById('days').textContent = overview.days_left;
      document.getElementById('remaining').textContent = money(overview.remaining_budget);
      document.getElementById('used').style.width = `${overview.used_percent}%`;
      document.getElementById('meta').textContent =
        `Payday ${overview.payday_date} · fixed ${money(overview.total_fixed)} · ` +
        `saved ${money(overview.total_savings)} over ${overview.months_archived} months · ` +
        `streak ${overview.streak}`;

      const list = document.getElementById('transactions');
      list.replaceChildren(...overview.transactions.slice().reverse().map((tx) => item(
        `${tx.is_income ? '+' : '-'}${money(tx.amount)} ${tx.description} (${tx.category})`,
        () => api('DELETE', `/api/transactions/${tx.id}`).then(refresh),
        tx.is_income ? 'income' : ''
      )));

      const fixed = document.getElementById('fixed');
      fixed.replaceChildren(...overview.fixed_expenses.map((expense) => item(
        `${expense.name} ${money(expense.monthly_amount)}/month`,
        () => api('DELETE', `/api/fixed-expenses/${expense.id}`).then(refresh)
      )));
    };

    const refresh = async () => {
      if (!userInput.value.trim()) {
        setStatus('Enter a user id to start', '');
        return;
      }
      overview = await api('GET', '/api/overview');
      render();
    };

    const submit = (id, handler) => {
      const form = document.getElementById(id);
      form.addEventListener('submit', (event) => {
        event.preventDefault();
        const data = new FormData(form);
        handler(data)
          .then(() => {
            form.reset();
            setStatus('Saved', '');
            return refresh();
          })
          .catch((err) => setStatus(err.message, 'error'));
      });
    };

    submit('spend-form', (data) => api('POST', '/api/transactions', {
      amount: Number(data.get('amount')),
      description: data.get('description') || null,
      category: data.get('category') || null,
      is_income: data.get('is_income') === 'on'
    }));

    submit('fixed-form', (data) => api('POST', '/api/fixed-expenses', {
      name: data.get('name'),
      monthly_amount: Number(data.get('monthly_amount'))
    }));

    submit('budget-form', (data) => api('POST', '/api/budget', {
      initial_budget: Number(data.get('initial_budget')),
      target_payday: data.get('target_payday') ? Number(data.get('target_payday')) : null
    }));

    document.getElementById('archive').addEventListener('click', () => {
      if (!confirm('Move what is left into savings and start over?')) return;
      api('POST', '/api/archive')
        .then(refresh)
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('theme').addEventListener('click', () => {
      if (!overview) return;
      const theme = overview.theme === 'dark' ? 'light' : 'dark';
      api('PUT', '/api/theme', { theme })
        .then(refresh)
        .catch((err) => setStatus(err.message, 'error'));
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
